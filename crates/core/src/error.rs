//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (lookups,
/// coercion of stored text, stock rules). Storage concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. blank name, zero quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The named product does not exist in the inventory.
    #[error("product not found: {0}")]
    NotFound(String),

    /// A text field did not coerce to its expected numeric type.
    #[error("invalid {field} value: {value:?}")]
    Parse { field: &'static str, value: String },

    /// The product exists but has nothing available.
    #[error("product is out of stock: {0}")]
    OutOfStock(String),

    /// A sale asked for more units than are available.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u64, available: i64 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn parse(field: &'static str, value: impl Into<String>) -> Self {
        Self::Parse {
            field,
            value: value.into(),
        }
    }

    pub fn out_of_stock(name: impl Into<String>) -> Self {
        Self::OutOfStock(name.into())
    }

    pub fn insufficient_stock(requested: u64, available: i64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    /// Whether this error means the product is missing (as opposed to present
    /// but unusable).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
