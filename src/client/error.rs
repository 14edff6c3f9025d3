use thiserror::Error;

use super::transport::TransportError;

pub const CONSENT_REQUIRED_MESSAGE: &str =
    "You must agree to receive emails with exciting discounts and personalized recommendations.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Why a submission did not complete. `Display` is the text shown to the user.
#[derive(Error, Debug)]
pub enum SignupError {
    #[error("{}", CONSENT_REQUIRED_MESSAGE)]
    ConsentRequired,

    #[error("{message}")]
    InvalidField { field: String, message: String },

    #[error("{message}")]
    SignupRejected { status: u16, message: String },

    #[error("{}", NETWORK_ERROR_MESSAGE)]
    NetworkError(#[source] TransportError),

    #[error("A signup is already in progress")]
    AlreadySubmitting,
}

impl SignupError {
    /// Whether the user sees this failure as a toast.
    pub fn is_reported(&self) -> bool {
        !matches!(self, SignupError::AlreadySubmitting)
    }
}
