//! Domain error types.

use thiserror::Error;

/// Top-level domain error type shared by every context.
///
/// Provider failures are deliberately coarse: callers only ever see one
/// message per category, while the detail carried by some variants is kept
/// for logging.
#[derive(Debug, Error)]
pub enum DomainError {
    /// User input failed validation; the user is re-prompted.
    #[error("{0}")]
    Validation(String),

    /// The request carried no valid session.
    #[error("sign in to continue")]
    Unauthenticated,

    /// Sign-in failed. Wrong password, unknown account and provider outages
    /// all collapse into this variant.
    #[error("invalid email or password")]
    AuthenticationFailed,

    /// Sign-up failed for any reason after input validation passed.
    #[error("sign up failed")]
    SignUpFailed,

    /// The identity provider rejected or failed a request.
    #[error("identity provider error: {0}")]
    Identity(String),

    /// The scene generator hit its quota or timed out. The payload is the
    /// provider detail, never shown to the user.
    #[error("reached today's limit or the request timed out")]
    GenerationUnavailable(String),

    /// A generation is already pending for this session.
    #[error("a palace is already being generated for this session")]
    SubmissionInProgress,

    /// A requested document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_unavailable_hides_provider_detail() {
        let err = DomainError::GenerationUnavailable("HTTP 429: quota exhausted".into());

        assert_eq!(
            err.to_string(),
            "reached today's limit or the request timed out"
        );
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = DomainError::Validation("Please enter both a topic and a location.".into());

        assert_eq!(err.to_string(), "Please enter both a topic and a location.");
    }
}
