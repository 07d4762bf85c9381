//! Client-side orchestration for registration with a passcode confirmation step.

pub mod decor;
pub mod error;
pub mod form;
pub mod page;
pub mod transport;
pub mod view;
pub mod workflow;

pub use error::{RegistrationError, SubmitRejected};
pub use form::RegistrationFormController;
pub use page::{Dispatched, PageEvent, RegistrationPage};
pub use transport::{HttpRegistrationApi, RegistrationApi};
pub use view::{FormView, Notice, NoticeKind, OtpView, SubmitControl};
pub use workflow::{
    OtpWorkflow, PendingSubmission, SubmissionOutcome, Transition, WorkflowSettings,
    WorkflowState,
};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
