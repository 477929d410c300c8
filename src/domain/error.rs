//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent rejected operations.
/// A failed operation never leaves a trip partially mutated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error(
        "not enough capacity for {people} people: need at least {required_rooms} rooms \
         with {max_per_room} people each (got {num_rooms})"
    )]
    Capacity {
        people: usize,
        num_rooms: usize,
        max_per_room: usize,
        required_rooms: usize,
    },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    /// Create a validation error for `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
