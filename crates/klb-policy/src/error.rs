//! Routing policy error types.

use thiserror::Error;

/// Result type alias for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Reasons a routing policy is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("unknown routing strategy: {0}")]
    UnknownStrategy(String),

    #[error("cluster ID is required")]
    MissingClusterId,

    #[error("default weight is required")]
    MissingDefaultWeight,

    #[error("default geocode is required")]
    MissingDefaultGeoCode,

    #[error("custom weight cannot be zero (entry {index})")]
    ZeroCustomWeight { index: usize },

    #[error("custom weight must define non-empty selector (entry {index})")]
    EmptyCustomWeightSelector { index: usize },
}

/// Reasons a label selector cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("invalid label key: {0:?}")]
    InvalidKey(String),

    #[error("invalid label value for key {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("operator {operator} on key {key} requires at least one value")]
    MissingValues { key: String, operator: String },

    #[error("operator {operator} on key {key} does not take values")]
    UnexpectedValues { key: String, operator: String },
}
