use shared::domain::{FormField, RegistrationDraft};
use tracing::debug;

use crate::{
    view::{FormView, OtpView},
    workflow::{OtpWorkflow, Transition},
};

/// Owns the registration form and routes its submission into the passcode step.
///
/// The form never posts on its own: submitting only opens the passcode modal,
/// and the draft is read later when the code is confirmed.
pub struct RegistrationFormController<F: FormView> {
    view: F,
}

impl<F: FormView> RegistrationFormController<F> {
    pub fn new(view: F) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &F {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut F {
        &mut self.view
    }

    /// Intercepts form submission and opens the passcode modal with an empty code.
    pub fn on_submit<V: OtpView>(&self, workflow: &mut OtpWorkflow<V>) -> Transition {
        debug!("intercepted registration form submission");
        workflow.open()
    }

    pub fn collect_draft(&self) -> RegistrationDraft {
        let mut draft = RegistrationDraft::default();
        for field in FormField::ALL {
            if field.is_text() {
                draft.set_text(field, self.view.text_value(field));
            }
        }
        draft.terms_accepted = self.view.is_checked(FormField::Terms);
        draft
    }
}
