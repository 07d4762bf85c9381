use shared::error::ValidationError;
use thiserror::Error;

use crate::{view::Notice, workflow::WorkflowState};

/// Failures of the registration call itself, after local validation passed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("registration rejected with status {status}")]
    Application {
        status: u16,
        message: Option<String>,
    },
    #[error("registration request failed: {0}")]
    Transport(String),
    #[error("invalid registration response: {0}")]
    Decode(String),
}

impl RegistrationError {
    /// Notice surfaced to the user for this failure. Transport and decode
    /// details stay on the diagnostic channel.
    pub fn notice(&self) -> Notice {
        match self {
            RegistrationError::Application { message, .. } => {
                Notice::RegistrationFailed(message.clone())
            }
            RegistrationError::Transport(_) | RegistrationError::Decode(_) => {
                Notice::UnexpectedError
            }
        }
    }
}

/// Reasons a passcode confirmation never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("passcode entry is not active (state: {0:?})")]
    Inactive(WorkflowState),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
