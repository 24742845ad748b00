//! Error types for projection and analysis

use thiserror::Error;

/// Failure of a projection or analysis run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// An assumption violates a domain invariant
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Every year's ratio was unavailable, so no average exists
    #[error("insufficient data to compute {metric}: no year has a defined value")]
    InsufficientData { metric: String },

    /// A computed figure left the range of finite numbers
    #[error("{field} is not a finite number; the assumptions are too large to project")]
    Overflow { field: String },
}

impl ProjectionError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn insufficient(metric: impl Into<String>) -> Self {
        Self::InsufficientData {
            metric: metric.into(),
        }
    }

    pub fn overflow(field: impl Into<String>) -> Self {
        Self::Overflow {
            field: field.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
