//! End-to-end scenarios against a real file, through the public API only.

use stockledger_core::DomainError;
use stockledger_inventory::{InventoryStore, ProductEntry, StockMode, StoreError};

fn entry(name: &str, price: &str, stock: u64, category: &str) -> ProductEntry {
    ProductEntry {
        name: name.to_string(),
        description: format!("A {name}"),
        company: "Acme".to_string(),
        price: price.to_string(),
        stock,
        category: category.to_string(),
    }
}

#[test]
fn restock_and_sell_a_desk_fan() {
    let dir = tempfile::tempdir().unwrap();
    let store = InventoryStore::open(dir.path().join("products.json"));
    assert!(store.list_product_names().unwrap().is_empty());

    let mut fan = entry("Fan", "29.99", 10, "Appliance");
    fan.description = "A desk fan".to_string();
    store.add_or_restock(fan, StockMode::Merge).unwrap();
    assert_eq!(store.get_stock("Fan").unwrap(), 10);

    let receipt = store.sell_product("Fan", 4).unwrap();
    assert_eq!(receipt.remaining, 6);

    match store.sell_product("Fan", 10).unwrap_err() {
        StoreError::Domain(DomainError::InsufficientStock {
            requested,
            available,
        }) => {
            assert_eq!(requested, 10);
            assert_eq!(available, 6);
        }
        other => panic!("Expected InsufficientStock, got {other:?}"),
    }
    assert_eq!(store.get_stock("Fan").unwrap(), 6);
}

#[test]
fn file_layout_is_text_valued_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = InventoryStore::open(dir.path().join("products.json"));
    store
        .add_or_restock(entry("Fan", "29.99", 10, "Appliance"), StockMode::Merge)
        .unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "Fan": {
                "Description": "A Fan",
                "Company": "Acme",
                "Price": "29.99",
                "Stock": "10",
                "Category": "Appliance"
            }
        })
    );
}

#[test]
fn hand_edited_files_are_read_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(
        &path,
        r#"{
            "Kettle": {"Description": "1.7 litre", "Company": "Brew Co", "Price": "19.5", "Stock": "3", "Category": "Kitchen"},
            "Toaster": {"Description": "2 slot", "Company": "Brew Co", "Price": "24", "Stock": "0"}
        }"#,
    )
    .unwrap();
    let store = InventoryStore::open(&path);

    assert_eq!(
        store.list_product_names().unwrap(),
        vec!["Kettle".to_string(), "Toaster".to_string()]
    );
    assert_eq!(store.get_price("Toaster").unwrap(), 24.0);
    assert!(matches!(
        store.get_stock("Toaster").unwrap_err(),
        StoreError::Domain(DomainError::OutOfStock(_))
    ));

    let categories = store.get_all_categories().unwrap();
    assert!(categories.contains("Kitchen"));
    assert!(categories.contains(""));
}

#[test]
fn separate_store_values_share_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    let writer = InventoryStore::open(&path);
    let reader = InventoryStore::open(&path);

    writer
        .add_or_restock(entry("Lamp", "12", 2, "Lighting"), StockMode::Merge)
        .unwrap();
    assert_eq!(reader.get_stock("Lamp").unwrap(), 2);

    reader.sell_product("Lamp", 2).unwrap();
    assert!(matches!(
        writer.get_stock("Lamp").unwrap_err(),
        StoreError::Domain(DomainError::OutOfStock(_))
    ));
}
