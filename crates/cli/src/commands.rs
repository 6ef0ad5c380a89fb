use anyhow::Context;
use serde::Serialize;

use stockledger_inventory::{
    InventoryStore, ProductEntry, RestockOutcome, StockMode, StoreConfig,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store = InventoryStore::new(resolve_config(&cli)?);
    tracing::debug!(path = %store.path().display(), "using inventory file");
    let format = cli.format;

    match cli.command {
        Command::List => {
            let names = store.list_product_names()?;
            emit(format, &names, || {
                names
                    .iter()
                    .enumerate()
                    .map(|(idx, name)| format!("{}. {name}", idx + 1))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Command::Price(args) => {
            let price = store.get_price(&args.name)?;
            emit(format, &price, || format!("{}: {price:.2}", args.name))
        }
        Command::Stock(args) => {
            let stock = store.get_stock(&args.name)?;
            emit(format, &stock, || format!("{}: {stock} in stock", args.name))
        }
        Command::Show(args) => {
            let record = store
                .get_details(&args.name)?
                .with_context(|| format!("product not found: {}", args.name))?;
            emit(format, &record, || {
                format!(
                    "{}\n  Description: {}\n  Company: {}\n  Price: {}\n  Stock: {}\n  Category: {}",
                    args.name,
                    record.description,
                    record.company,
                    record.price,
                    record.stock,
                    record.category
                )
            })
        }
        Command::Categories => {
            let categories = store.get_all_categories()?;
            emit(format, &categories, || {
                categories.iter().cloned().collect::<Vec<_>>().join("\n")
            })
        }
        Command::Add(args) => cmd_add(&store, format, args),
        Command::Sell(args) => {
            let receipt = store.sell_product(&args.name, args.quantity)?;
            emit(format, &receipt, || {
                format!(
                    "Sold {} of '{}'. New stock: {}",
                    receipt.quantity, receipt.name, receipt.remaining
                )
            })
        }
        Command::Remove(args) => {
            let record = store.remove_product(&args.name)?;
            emit(format, &record, || format!("Removed '{}'", args.name))
        }
    }
}

/// Environment first, then command-line flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = StoreConfig::from_env().context("invalid environment configuration")?;
    if let Some(path) = &cli.db {
        config.path = path.clone();
    }
    if let Some(policy) = cli.on_corrupt {
        config.corrupt_policy = policy;
    }
    Ok(config)
}

fn cmd_add(store: &InventoryStore, format: OutputFormat, args: AddArgs) -> anyhow::Result<()> {
    let mode = if args.replace {
        StockMode::Replace
    } else {
        StockMode::Merge
    };
    let name = args.name.clone();
    let outcome = store.add_or_restock(
        ProductEntry {
            name: args.name,
            description: args.description,
            company: args.company,
            price: args.price,
            stock: args.stock,
            category: args.category,
        },
        mode,
    )?;

    emit(format, &outcome, || match outcome {
        RestockOutcome::Created { stock } => format!("Added '{name}' with stock {stock}"),
        RestockOutcome::Restocked { stock, .. } => format!(
            "Product '{name}' already exists. Stock has been updated.\nNew stock for '{name}': {stock}"
        ),
        RestockOutcome::Replaced { stock } => format!("Updated '{name}'. Stock: {stock}"),
    })
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let text = text();
            if !text.is_empty() {
                println!("{text}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}
