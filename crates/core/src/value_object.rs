//! Value object trait and the numeric values stored on a product record.
//!
//! Records keep price and stock as text; these types are what that text
//! coerces to when an operation needs the number.

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects have no identity: two values with the same attributes are
/// the same value. They are immutable; "changing" one produces a new value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Unit price of a product.
///
/// Always finite and non-negative.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Price(f64);

impl ValueObject for Price {}

impl Price {
    /// Coerce stored or supplied text into a price.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let value: f64 = text
            .trim()
            .parse()
            .map_err(|_| DomainError::parse("price", text))?;
        Self::new(value).map_err(|_| DomainError::parse("price", text))
    }

    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::validation(format!(
                "price must be a non-negative number, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Stock count as read from a record.
///
/// Signed on purpose: a negative count written by hand is still readable so it
/// can be reported as out of stock. The store itself never produces one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StockLevel(i64);

impl ValueObject for StockLevel {}

impl StockLevel {
    pub const ZERO: StockLevel = StockLevel(0);

    /// Coerce stored text into a stock level.
    pub fn parse(text: &str) -> DomainResult<Self> {
        text.trim()
            .parse()
            .map(Self)
            .map_err(|_| DomainError::parse("stock", text))
    }

    pub fn from_units(units: u64) -> DomainResult<Self> {
        i64::try_from(units)
            .map(Self)
            .map_err(|_| DomainError::invariant(format!("stock of {units} units is too large")))
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Units available for sale, or `None` when the level is zero or below.
    pub fn available(self) -> Option<u64> {
        u64::try_from(self.0).ok().filter(|units| *units > 0)
    }

    /// Level after receiving `delta` more units.
    pub fn restock(self, delta: u64) -> DomainResult<Self> {
        let next = i64::try_from(delta)
            .ok()
            .and_then(|delta| self.0.checked_add(delta))
            .ok_or_else(|| DomainError::invariant("stock count overflow"))?;
        if next < 0 {
            return Err(DomainError::invariant(format!(
                "stock would remain negative ({next}) after restock"
            )));
        }
        Ok(Self(next))
    }

    /// Level after selling `quantity` units.
    pub fn sell(self, quantity: u64) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("sale quantity must be positive"));
        }
        i64::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity <= self.0)
            .map(|quantity| Self(self.0 - quantity))
            .ok_or_else(|| DomainError::insufficient_stock(quantity, self.0))
    }
}

impl core::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
