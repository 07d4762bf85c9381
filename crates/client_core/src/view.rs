//! View bindings injected into the form controller and the passcode workflow.
//!
//! The core never touches a rendering surface directly. A front end implements
//! these traits over whatever it draws on (a DOM, a terminal, a test recorder).

use std::fmt;

use shared::{domain::FormField, error::ValidationError};

/// Read side of the registration form.
pub trait FormView {
    /// Current value of a text field. `FormField::Terms` is read with [`FormView::is_checked`].
    fn text_value(&self, field: FormField) -> String;
    fn is_checked(&self, field: FormField) -> bool;
}

/// Write side of the passcode modal.
pub trait OtpView {
    fn set_modal_visible(&mut self, visible: bool);
    fn set_cell(&mut self, index: usize, value: Option<char>);
    fn focus_cell(&mut self, index: usize);
    fn submit_control(&self) -> SubmitControl;
    fn set_submit_control(&mut self, control: SubmitControl);
    fn set_back_enabled(&mut self, enabled: bool);
    /// Blocking, user-visible notice.
    fn notify(&mut self, notice: &Notice);
    fn navigate(&mut self, destination: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: String,
}

impl SubmitControl {
    pub fn enabled(label: impl Into<String>) -> Self {
        Self {
            disabled: false,
            label: label.into(),
        }
    }

    pub fn busy(label: impl Into<String>) -> Self {
        Self {
            disabled: true,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

pub const REGISTRATION_FAILED_FALLBACK: &str = "Registration failed";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Invalid(ValidationError),
    CodeResent,
    Registered,
    /// Server rejected the registration; carries its `message` when one was sent.
    RegistrationFailed(Option<String>),
    UnexpectedError,
}

impl Notice {
    pub fn kind(&self) -> NoticeKind {
        match self {
            Notice::CodeResent => NoticeKind::Info,
            Notice::Registered => NoticeKind::Success,
            Notice::Invalid(_) | Notice::RegistrationFailed(_) | Notice::UnexpectedError => {
                NoticeKind::Error
            }
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Invalid(err) => write!(formatter, "{err}"),
            Notice::CodeResent => {
                write!(formatter, "A new OTP code has been sent to your phone.")
            }
            Notice::Registered => {
                write!(formatter, "Registration successful! Redirecting to login...")
            }
            Notice::RegistrationFailed(message) => match message.as_deref() {
                Some(message) if !message.is_empty() => write!(formatter, "{message}"),
                _ => write!(formatter, "{REGISTRATION_FAILED_FALLBACK}"),
            },
            Notice::UnexpectedError => write!(formatter, "{UNEXPECTED_ERROR_MESSAGE}"),
        }
    }
}
