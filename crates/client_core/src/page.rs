//! One registration page: the form controller, its passcode workflow and the
//! API handle they submit through. Pages hold their own view bindings, so any
//! number can coexist.

use std::sync::Arc;

use tracing::debug;

use crate::{
    form::RegistrationFormController,
    transport::RegistrationApi,
    view::{FormView, OtpView},
    workflow::{OtpWorkflow, SubmissionOutcome, Transition, WorkflowSettings, WorkflowState},
};

/// Discrete UI events delivered by the host, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SubmitForm,
    CellInput { index: usize, value: String },
    Backspace { index: usize },
    Resend,
    Back,
    ConfirmCode,
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::SubmitForm => "submit_form",
            PageEvent::CellInput { .. } => "cell_input",
            PageEvent::Backspace { .. } => "backspace",
            PageEvent::Resend => "resend",
            PageEvent::Back => "back",
            PageEvent::ConfirmCode => "confirm_code",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Transition(Transition),
    Submission(SubmissionOutcome),
}

pub struct RegistrationPage<F: FormView, V: OtpView> {
    form: RegistrationFormController<F>,
    workflow: OtpWorkflow<V>,
    api: Arc<dyn RegistrationApi>,
}

impl<F: FormView, V: OtpView> RegistrationPage<F, V> {
    pub fn new(
        form_view: F,
        otp_view: V,
        api: Arc<dyn RegistrationApi>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            form: RegistrationFormController::new(form_view),
            workflow: OtpWorkflow::new(otp_view, settings),
            api,
        }
    }

    pub fn form(&self) -> &RegistrationFormController<F> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegistrationFormController<F> {
        &mut self.form
    }

    pub fn workflow(&self) -> &OtpWorkflow<V> {
        &self.workflow
    }

    pub fn state(&self) -> WorkflowState {
        self.workflow.state()
    }

    pub fn submit_form(&mut self) -> Transition {
        self.form.on_submit(&mut self.workflow)
    }

    pub async fn confirm_code(&mut self) -> SubmissionOutcome {
        self.workflow.submit(&self.form, self.api.as_ref()).await
    }

    pub async fn dispatch(&mut self, event: PageEvent) -> Dispatched {
        debug!(event = event.name(), state = ?self.workflow.state(), "dispatching page event");
        let transition = match event {
            PageEvent::SubmitForm => self.submit_form(),
            PageEvent::CellInput { index, value } => self.workflow.input(index, &value),
            PageEvent::Backspace { index } => self.workflow.backspace(index),
            PageEvent::Resend => self.workflow.resend(),
            PageEvent::Back => self.workflow.cancel(),
            PageEvent::ConfirmCode => return Dispatched::Submission(self.confirm_code().await),
        };
        Dispatched::Transition(transition)
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
