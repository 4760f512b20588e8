//! Unified error model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeaflineError {
    #[error("PLAYBOOK_NOT_FOUND/{0}")]
    PlaybookNotFound(String),

    #[error("VERSION_MISMATCH/{0}")]
    VersionMismatch(String),

    #[error("PATH_NOT_ALLOWED/{0}")]
    PathNotAllowed(String),

    #[error("MALFORMED_PATCH/{0}")]
    MalformedPatch(String),

    #[error("INVALID_TRANSITION/{0}")]
    InvalidTransition(String),

    #[error("WEATHER_UNAVAILABLE/{0}")]
    WeatherUnavailable(String),
}

impl LeaflineError {
    /// Whether resubmitting the same request can succeed after the caller
    /// refetches state. A stale base version is retryable; a patch that
    /// targets a forbidden path or is structurally broken is not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LeaflineError::VersionMismatch(_) | LeaflineError::WeatherUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_display() {
        let err = LeaflineError::VersionMismatch("expected 3, got 2".to_string());
        assert!(err.to_string().starts_with("VERSION_MISMATCH/"));

        let err = LeaflineError::PathNotAllowed("/metadata/owner".to_string());
        assert!(err.to_string().starts_with("PATH_NOT_ALLOWED/"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(LeaflineError::VersionMismatch("stale".into()).is_retryable());
        assert!(!LeaflineError::MalformedPatch("bad path".into()).is_retryable());
        assert!(!LeaflineError::PathNotAllowed("/x".into()).is_retryable());
    }
}
