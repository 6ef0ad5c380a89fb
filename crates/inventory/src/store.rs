use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use stockledger_core::{DomainError, Price, ProductName, StockLevel};

use crate::config::{CorruptPolicy, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::record::{Inventory, ProductRecord};

/// How `add_or_restock` treats the stock of a product that already exists.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockMode {
    /// Receive new units: existing stock + supplied stock.
    #[default]
    Merge,
    /// Edit the record: stock becomes the supplied value.
    Replace,
}

/// Input to `add_or_restock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    pub name: String,
    pub description: String,
    pub company: String,
    /// Decimal text, stored as supplied once it is known to parse.
    pub price: String,
    pub stock: u64,
    pub category: String,
}

/// What `add_or_restock` did.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum RestockOutcome {
    Created { stock: u64 },
    Restocked { previous: i64, stock: u64 },
    Replaced { stock: u64 },
}

impl RestockOutcome {
    pub fn stock(&self) -> u64 {
        match self {
            Self::Created { stock } | Self::Restocked { stock, .. } | Self::Replaced { stock } => {
                *stock
            }
        }
    }
}

/// Result of a successful sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub name: String,
    pub quantity: u64,
    pub remaining: i64,
}

/// File-backed inventory.
///
/// Every operation loads the whole file, acts on the in-memory copy, and (for
/// mutations) writes the whole file back before returning. Nothing is cached
/// between calls, so the file is the only source of truth.
///
/// There is no locking: two load-mutate-persist cycles interleaved from
/// different processes lose one of the updates. Callers that need concurrency
/// must serialize access around each operation.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    config: StoreConfig,
}

impl InventoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Store at `path` with the default corrupt-file policy.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        self.config.path()
    }

    /// Read and parse the whole backing file.
    ///
    /// A missing file is created holding an empty inventory. A file that does
    /// not parse is handled per [`CorruptPolicy`].
    pub fn load(&self) -> StoreResult<Inventory> {
        let path = self.path();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "inventory file missing; creating an empty one");
                let inventory = Inventory::new();
                self.persist(&inventory)?;
                return Ok(inventory);
            }
            Err(err) => return Err(StoreError::io(path, err)),
        };

        // invalid UTF-8 surfaces as a JSON error, so it is corrupt like any other bad document
        match serde_json::from_slice::<Inventory>(&bytes) {
            Ok(inventory) => {
                tracing::debug!(path = %path.display(), products = inventory.len(), "inventory loaded");
                Ok(inventory)
            }
            Err(source) => match self.config.corrupt_policy {
                CorruptPolicy::Fail => Err(StoreError::Corrupt {
                    path: path.to_path_buf(),
                    source,
                }),
                CorruptPolicy::TreatAsEmpty => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %source,
                        "inventory file is corrupt; treating it as empty"
                    );
                    Ok(Inventory::new())
                }
            },
        }
    }

    /// Replace the backing file with `inventory`.
    ///
    /// The document is written to a temporary file in the same directory,
    /// synced, then renamed over the original, so a crash leaves either the old
    /// or the new content and never a truncated file.
    ///
    /// An existing file keeps its permissions. A file created by the first
    /// write gets the temporary file's owner-only mode.
    pub fn persist(&self, inventory: &Inventory) -> StoreResult<()> {
        let path = self.path();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut json = serde_json::to_string_pretty(inventory).map_err(StoreError::Serialize)?;
        json.push('\n');

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        match fs::metadata(path) {
            Ok(existing) => tmp
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| StoreError::io(tmp.path(), e))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(StoreError::io(path, err)),
        }
        tmp.write_all(json.as_bytes())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| StoreError::io(path, e.error))?;

        tracing::debug!(path = %path.display(), products = inventory.len(), "inventory persisted");
        Ok(())
    }

    /// Every product name, in inventory order.
    pub fn list_product_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.load()?.names())
    }

    pub fn get_price(&self, name: &str) -> StoreResult<f64> {
        let inventory = self.load()?;
        let record = Self::lookup(&inventory, name)?;
        Ok(record.price()?.value())
    }

    /// Units available for sale.
    ///
    /// A stored count of zero or less is reported as `OutOfStock`, distinct
    /// from the product being absent.
    pub fn get_stock(&self, name: &str) -> StoreResult<u64> {
        let inventory = self.load()?;
        let record = Self::lookup(&inventory, name)?;
        let units = record
            .stock_level()?
            .available()
            .ok_or_else(|| DomainError::out_of_stock(name))?;
        Ok(units)
    }

    pub fn get_details(&self, name: &str) -> StoreResult<Option<ProductRecord>> {
        Ok(self.load()?.remove(name))
    }

    pub fn get_all_categories(&self) -> StoreResult<BTreeSet<String>> {
        Ok(self.load()?.categories())
    }

    /// Create a product, or update an existing one according to `mode`.
    ///
    /// Description, company, price and category of an existing product are
    /// always overwritten. Nothing is written if the supplied price does not
    /// parse or, in merge mode, if the stored stock does not.
    pub fn add_or_restock(&self, entry: ProductEntry, mode: StockMode) -> StoreResult<RestockOutcome> {
        let name = ProductName::new(entry.name)?;
        Price::parse(&entry.price)?;
        let supplied = StockLevel::from_units(entry.stock)?;

        let mut inventory = self.load()?;
        let (stock, outcome) = match (inventory.get(name.as_str()), mode) {
            (None, _) => (supplied, RestockOutcome::Created { stock: entry.stock }),
            (Some(_), StockMode::Replace) => {
                (supplied, RestockOutcome::Replaced { stock: entry.stock })
            }
            (Some(existing), StockMode::Merge) => {
                let previous = existing.stock_level()?;
                let next = previous.restock(entry.stock)?;
                // restock never yields a negative level
                let outcome = RestockOutcome::Restocked {
                    previous: previous.value(),
                    stock: next.value().unsigned_abs(),
                };
                (next, outcome)
            }
        };

        inventory.insert(
            name.as_str(),
            ProductRecord {
                description: entry.description,
                company: entry.company,
                price: entry.price,
                stock: stock.to_string(),
                category: entry.category,
            },
        );
        self.persist(&inventory)?;

        match outcome {
            RestockOutcome::Restocked { previous, stock } => {
                tracing::info!(
                    product = %name,
                    previous,
                    stock,
                    "product already exists; stock has been updated"
                );
            }
            RestockOutcome::Replaced { stock } => {
                tracing::info!(product = %name, stock, "product updated");
            }
            RestockOutcome::Created { stock } => {
                tracing::info!(product = %name, stock, "product added");
            }
        }

        Ok(outcome)
    }

    /// Sell `quantity` units, persisting the lowered stock.
    ///
    /// Not idempotent: each successful call decrements again.
    pub fn sell_product(&self, name: &str, quantity: u64) -> StoreResult<SaleReceipt> {
        if quantity == 0 {
            return Err(DomainError::validation("sale quantity must be positive").into());
        }

        let mut inventory = self.load()?;
        let record = inventory
            .get_mut(name)
            .ok_or_else(|| DomainError::not_found(name))?;
        let remaining = record.stock_level()?.sell(quantity)?;
        record.stock = remaining.to_string();
        self.persist(&inventory)?;

        tracing::info!(product = name, quantity, remaining = remaining.value(), "product sold");
        Ok(SaleReceipt {
            name: name.to_string(),
            quantity,
            remaining: remaining.value(),
        })
    }

    /// Delete a product, returning its last record.
    pub fn remove_product(&self, name: &str) -> StoreResult<ProductRecord> {
        let mut inventory = self.load()?;
        let record = inventory
            .remove(name)
            .ok_or_else(|| DomainError::not_found(name))?;
        self.persist(&inventory)?;

        tracing::info!(product = name, "product removed");
        Ok(record)
    }

    fn lookup<'a>(inventory: &'a Inventory, name: &str) -> Result<&'a ProductRecord, DomainError> {
        inventory.get(name).ok_or_else(|| DomainError::not_found(name))
    }
}
