//! Inventory data-access and mutation layer.
//!
//! [`InventoryStore`] owns a single JSON file of product records and exposes
//! the queries and mutations over it. Every call is a self-contained
//! load, act, persist cycle against that file.

pub mod config;
pub mod error;
pub mod record;
pub mod store;

pub use config::{ConfigError, CorruptPolicy, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use record::{Inventory, ProductRecord};
pub use store::{InventoryStore, ProductEntry, RestockOutcome, SaleReceipt, StockMode};
