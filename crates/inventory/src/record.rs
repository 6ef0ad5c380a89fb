use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use stockledger_core::{DomainResult, Price, StockLevel};

/// One inventory entry, exactly as persisted.
///
/// Every field is text on disk, numeric ones included. Coercion happens when
/// an operation needs the number (`price()` / `stock_level()`), so a single
/// bad record only fails the queries that touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductRecord {
    pub description: String,
    pub company: String,
    pub price: String,
    pub stock: String,
    #[serde(default)]
    pub category: String,
}

impl ProductRecord {
    pub fn price(&self) -> DomainResult<Price> {
        Price::parse(&self.price)
    }

    pub fn stock_level(&self) -> DomainResult<StockLevel> {
        StockLevel::parse(&self.stock)
    }
}

/// The full persisted state: product name to record.
///
/// Keyed by the exact name text. Iteration is in name order, which keeps the
/// on-disk layout and `names()` stable across reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    records: BTreeMap<String, ProductRecord>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ProductRecord> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ProductRecord> {
        self.records.get_mut(name)
    }

    /// Insert or replace a record, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, record: ProductRecord) -> Option<ProductRecord> {
        self.records.insert(name.into(), record)
    }

    pub fn remove(&mut self, name: &str) -> Option<ProductRecord> {
        self.records.remove(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    /// Distinct category values across all records.
    pub fn categories(&self) -> BTreeSet<String> {
        self.records
            .values()
            .map(|record| record.category.clone())
            .collect()
    }
}

impl FromIterator<(String, ProductRecord)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (String, ProductRecord)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str) -> ProductRecord {
        ProductRecord {
            description: "d".to_string(),
            company: "c".to_string(),
            price: "1.00".to_string(),
            stock: "1".to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn serializes_with_capitalized_keys() {
        let inventory: Inventory = [("Fan".to_string(), record("Appliance"))]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&inventory).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Fan": {
                    "Description": "d",
                    "Company": "c",
                    "Price": "1.00",
                    "Stock": "1",
                    "Category": "Appliance"
                }
            })
        );
    }

    #[test]
    fn records_without_category_still_load() {
        let json = r#"{"Lamp": {"Description": "x", "Company": "y", "Price": "2", "Stock": "3"}}"#;
        let inventory: Inventory = serde_json::from_str(json).unwrap();
        assert_eq!(inventory.get("Lamp").unwrap().category, "");
    }

    #[test]
    fn numeric_fields_must_be_text() {
        let json = r#"{"Lamp": {"Description": "x", "Company": "y", "Price": 2, "Stock": "3"}}"#;
        assert!(serde_json::from_str::<Inventory>(json).is_err());
    }

    #[test]
    fn categories_are_distinct() {
        let inventory: Inventory = [
            ("A".to_string(), record("X")),
            ("B".to_string(), record("Y")),
            ("C".to_string(), record("X")),
        ]
        .into_iter()
        .collect();

        let expected: BTreeSet<String> = ["X", "Y"].into_iter().map(String::from).collect();
        assert_eq!(inventory.categories(), expected);
    }
}
