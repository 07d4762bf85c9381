use thiserror::Error;

/// Client-detectable problems rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter the complete {expected}-digit OTP code.")]
    IncompleteCode { expected: usize, filled: usize },
    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort { min: usize, actual: usize },
}
