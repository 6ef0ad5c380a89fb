//! `stockledger-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no file or process concerns):
//! the error taxonomy shared by every layer, the product name key, and the
//! numeric values that a product record's text fields coerce to.

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::ProductName;
pub use value_object::{Price, StockLevel, ValueObject};
