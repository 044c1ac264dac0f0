//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Callers decide
/// how to surface them; the domain never retries or recovers internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No product with the requested id exists in the store.
    #[error("product with id {0} not found")]
    NotFound(ProductId),

    /// A rating ordinal was outside the rating scale.
    #[error("invalid rating ordinal: {0}")]
    InvalidRating(u8),
}

impl DomainError {
    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }

    pub fn invalid_rating(ordinal: u8) -> Self {
        Self::InvalidRating(ordinal)
    }

    /// Returns `true` for the "no such product" failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = DomainError::not_found(ProductId::new(42));
        assert_eq!(err.to_string(), "product with id 42 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn invalid_rating_is_not_a_lookup_failure() {
        let err = DomainError::invalid_rating(9);
        assert_eq!(err.to_string(), "invalid rating ordinal: 9");
        assert!(!err.is_not_found());
    }
}
