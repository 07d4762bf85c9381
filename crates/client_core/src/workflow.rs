//! Passcode modal state machine.
//!
//! `Closed -> Editing` on form submission, `Editing -> Submitting` once the code
//! is complete and the draft passes local checks, and back to `Closed` on every
//! resolution of the registration call, including an attempt abandoned because
//! its future was dropped. While `Submitting`, cell input, resend and back are
//! ignored and the back control is disabled.

use shared::{
    domain::{OtpCode, MIN_PASSWORD_LENGTH, OTP_LENGTH},
    error::ValidationError,
    protocol::{RegisterRequest, RegisterResponse},
};
use tracing::{debug, error, info, warn};

use crate::{
    error::{RegistrationError, SubmitRejected},
    form::RegistrationFormController,
    transport::RegistrationApi,
    view::{FormView, Notice, OtpView, SubmitControl},
};

pub const DEFAULT_LOGIN_DESTINATION: &str = "login.html";
pub const DEFAULT_PROGRESS_LABEL: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub login_destination: String,
    pub min_password_length: usize,
    /// Attach the entered code to the registration request as `otpCode`.
    pub send_otp_code: bool,
    pub progress_label: String,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            login_destination: DEFAULT_LOGIN_DESTINATION.into(),
            min_password_length: MIN_PASSWORD_LENGTH,
            send_otp_code: false,
            progress_label: DEFAULT_PROGRESS_LABEL.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Closed,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

/// A registration attempt that passed local gating and awaits the server.
#[derive(Debug)]
pub struct PendingSubmission {
    request: RegisterRequest,
    original_control: SubmitControl,
}

impl PendingSubmission {
    pub fn request(&self) -> &RegisterRequest {
        &self.request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Rejected(SubmitRejected),
    Registered {
        destination: String,
        token: Option<String>,
    },
    Failed(RegistrationError),
}

pub struct OtpWorkflow<V: OtpView> {
    view: V,
    settings: WorkflowSettings,
    state: WorkflowState,
    code: OtpCode,
    focused: Option<usize>,
}

impl<V: OtpView> OtpWorkflow<V> {
    pub fn new(view: V, settings: WorkflowSettings) -> Self {
        Self {
            view,
            settings,
            state: WorkflowState::Closed,
            code: OtpCode::new(),
            focused: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn code(&self) -> &OtpCode {
        &self.code
    }

    pub fn focused_cell(&self) -> Option<usize> {
        self.focused
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Shows the modal with every cell cleared and the first cell focused.
    pub fn open(&mut self) -> Transition {
        if self.state == WorkflowState::Submitting {
            debug!("ignoring open while registration is in flight");
            return Transition::Ignored;
        }
        self.clear_cells();
        self.state = WorkflowState::Editing;
        self.view.set_modal_visible(true);
        self.focus(0);
        info!("passcode entry opened");
        Transition::Applied
    }

    /// Back/cancel. Hides the modal without touching the form or the network.
    pub fn cancel(&mut self) -> Transition {
        if self.state != WorkflowState::Editing {
            debug!(state = ?self.state, "ignoring cancel");
            return Transition::Ignored;
        }
        self.close();
        info!("passcode entry cancelled");
        Transition::Applied
    }

    /// Local stub: no request is sent, the code is cleared for re-entry.
    pub fn resend(&mut self) -> Transition {
        if self.state != WorkflowState::Editing {
            return Transition::Ignored;
        }
        self.view.notify(&Notice::CodeResent);
        self.clear_cells();
        self.focus(0);
        debug!("passcode cleared for resend");
        Transition::Applied
    }

    /// Raw input into cell `index`; a non-empty cell advances focus unless it is the last.
    pub fn input(&mut self, index: usize, raw: &str) -> Transition {
        if self.state != WorkflowState::Editing || index >= OTP_LENGTH {
            return Transition::Ignored;
        }
        let stored = self.code.set(index, raw);
        self.view.set_cell(index, stored);
        if stored.is_some() && index + 1 < OTP_LENGTH {
            self.focus(index + 1);
        }
        Transition::Applied
    }

    /// Backspace in cell `index`. A filled cell is cleared in place; an empty
    /// cell hands focus to its predecessor. Cell 0 is a boundary.
    pub fn backspace(&mut self, index: usize) -> Transition {
        if self.state != WorkflowState::Editing || index >= OTP_LENGTH {
            return Transition::Ignored;
        }
        if !self.code.is_cell_empty(index) {
            self.code.clear_cell(index);
            self.view.set_cell(index, None);
        } else if index > 0 {
            self.focus(index - 1);
        }
        Transition::Applied
    }

    /// Gates a confirmation: code completeness first, then the draft's password
    /// length. On success the submit control is disabled and the workflow is
    /// `Submitting` until [`OtpWorkflow::finish_submission`] runs.
    pub fn begin_submission<F: FormView>(
        &mut self,
        form: &RegistrationFormController<F>,
    ) -> Result<PendingSubmission, SubmitRejected> {
        if self.state != WorkflowState::Editing {
            debug!(state = ?self.state, "ignoring confirmation");
            return Err(SubmitRejected::Inactive(self.state));
        }

        if !self.code.is_complete() {
            return Err(self.reject(ValidationError::IncompleteCode {
                expected: OTP_LENGTH,
                filled: self.code.filled(),
            }));
        }

        let draft = form.collect_draft();
        let password_len = draft.password_len();
        if password_len < self.settings.min_password_length {
            return Err(self.reject(ValidationError::PasswordTooShort {
                min: self.settings.min_password_length,
                actual: password_len,
            }));
        }

        let mut request = RegisterRequest::from_draft(draft);
        if self.settings.send_otp_code {
            request = request.with_otp_code(self.code.value());
        }

        let original_control = self.view.submit_control();
        self.view
            .set_submit_control(SubmitControl::busy(self.settings.progress_label.clone()));
        self.view.set_back_enabled(false);
        self.state = WorkflowState::Submitting;
        info!(
            otp_bound = request.otp_code.is_some(),
            "submitting registration"
        );

        Ok(PendingSubmission {
            request,
            original_control,
        })
    }

    /// Resolves an in-flight attempt. The modal is hidden and the submit
    /// control restored on every path.
    pub fn finish_submission(
        &mut self,
        pending: PendingSubmission,
        result: Result<RegisterResponse, RegistrationError>,
    ) -> SubmissionOutcome {
        let outcome = match result {
            Ok(response) => {
                info!(
                    destination = %self.settings.login_destination,
                    "registration accepted"
                );
                self.view.notify(&Notice::Registered);
                self.view.navigate(&self.settings.login_destination);
                SubmissionOutcome::Registered {
                    destination: self.settings.login_destination.clone(),
                    token: response.token,
                }
            }
            Err(err) => {
                match &err {
                    RegistrationError::Application { status, .. } => {
                        warn!(status, "registration rejected by server");
                    }
                    RegistrationError::Transport(_) | RegistrationError::Decode(_) => {
                        error!(error = %err, "registration request failed");
                    }
                }
                self.view.notify(&err.notice());
                SubmissionOutcome::Failed(err)
            }
        };

        self.restore_after_submission(pending);
        outcome
    }

    /// Gives up on an in-flight attempt whose result will never be delivered.
    /// No notice is shown; the modal is hidden and the controls restored so the
    /// form can be submitted again. The request itself is not recalled.
    pub fn abandon_submission(&mut self, pending: PendingSubmission) {
        warn!("registration abandoned before the server answered");
        self.restore_after_submission(pending);
    }

    /// Gates, performs the registration call and resolves it. At most one call
    /// is made per invocation and none when gating rejects.
    pub async fn submit<F: FormView>(
        &mut self,
        form: &RegistrationFormController<F>,
        api: &dyn RegistrationApi,
    ) -> SubmissionOutcome {
        let pending = match self.begin_submission(form) {
            Ok(pending) => pending,
            Err(rejected) => return SubmissionOutcome::Rejected(rejected),
        };
        let request = pending.request().clone();
        let guard = SubmissionGuard {
            workflow: self,
            pending: Some(pending),
        };
        let result = api.register(&request).await;
        guard.finish(result)
    }

    fn restore_after_submission(&mut self, pending: PendingSubmission) {
        self.view.set_submit_control(pending.original_control);
        self.view.set_back_enabled(true);
        self.close();
    }

    fn reject(&mut self, err: ValidationError) -> SubmitRejected {
        debug!(reason = %err, "confirmation rejected locally");
        self.view.notify(&Notice::Invalid(err.clone()));
        SubmitRejected::Invalid(err)
    }

    fn focus(&mut self, index: usize) {
        self.focused = Some(index);
        self.view.focus_cell(index);
    }

    fn clear_cells(&mut self) {
        self.code.clear();
        for index in 0..OTP_LENGTH {
            self.view.set_cell(index, None);
        }
    }

    fn close(&mut self) {
        self.clear_cells();
        self.focused = None;
        self.state = WorkflowState::Closed;
        self.view.set_modal_visible(false);
    }
}

/// Keeps an attempt resolvable when the `submit` future is dropped mid-flight:
/// an unfinished guard abandons its submission on drop.
struct SubmissionGuard<'a, V: OtpView> {
    workflow: &'a mut OtpWorkflow<V>,
    pending: Option<PendingSubmission>,
}

impl<V: OtpView> SubmissionGuard<'_, V> {
    fn finish(
        mut self,
        result: Result<RegisterResponse, RegistrationError>,
    ) -> SubmissionOutcome {
        match self.pending.take() {
            Some(pending) => self.workflow.finish_submission(pending, result),
            None => SubmissionOutcome::Rejected(SubmitRejected::Inactive(self.workflow.state())),
        }
    }
}

impl<V: OtpView> Drop for SubmissionGuard<'_, V> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.workflow.abandon_submission(pending);
        }
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
