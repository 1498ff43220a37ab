//! Synthesis error types.

use klb_policy::PolicyError;
use thiserror::Error;

/// Result type alias for synthesis.
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Reasons synthesis produces nothing. None of them are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("listener hostname is empty")]
    MissingListenerHost,

    #[error("previous record set is required")]
    MissingPreviousState,

    #[error("unknown routing strategy: {0}")]
    UnknownRoutingStrategy(String),

    #[error("invalid routing policy: {0}")]
    InvalidRoutingPolicy(#[source] PolicyError),
}

impl From<PolicyError> for SynthesisError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::UnknownStrategy(name) => SynthesisError::UnknownRoutingStrategy(name),
            other => SynthesisError::InvalidRoutingPolicy(other),
        }
    }
}
