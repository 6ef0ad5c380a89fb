use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stockledger_inventory::CorruptPolicy;

#[derive(Parser, Debug)]
#[command(name = "stockledger", about = "Local product inventory ledger", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Inventory file (overrides STOCKLEDGER_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// What to do with an unreadable inventory file: fail | empty
    /// (overrides STOCKLEDGER_ON_CORRUPT)
    #[arg(long, global = true)]
    pub on_corrupt: Option<CorruptPolicy>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List product names
    List,
    /// Show the price of a product
    Price(NameArgs),
    /// Show units available for sale
    Stock(NameArgs),
    /// Show every field of a product
    Show(NameArgs),
    /// List distinct categories
    Categories,
    /// Add a product, or restock an existing one
    Add(AddArgs),
    /// Sell units of a product
    Sell(SellArgs),
    /// Delete a product
    Remove(NameArgs),
}

#[derive(Args, Debug)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub company: String,
    #[arg(long)]
    pub price: String,
    /// Units received (or the new count with --replace)
    #[arg(long)]
    pub stock: u64,
    #[arg(long, default_value = "")]
    pub category: String,
    /// Set the stock to --stock instead of adding to it
    #[arg(long)]
    pub replace: bool,
}

#[derive(Args, Debug)]
pub struct SellArgs {
    pub name: String,
    pub quantity: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_flags() {
        let cli = Cli::try_parse_from([
            "stockledger",
            "add",
            "Fan",
            "--description",
            "A desk fan",
            "--price",
            "29.99",
            "--stock",
            "10",
            "--category",
            "Appliance",
        ])
        .unwrap();
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.name, "Fan");
                assert_eq!(args.description, "A desk fan");
                assert_eq!(args.company, "");
                assert_eq!(args.price, "29.99");
                assert_eq!(args.stock, 10);
                assert!(!args.replace);
            }
            other => panic!("Expected Add, got {other:?}"),
        }
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "stockledger",
            "sell",
            "Fan",
            "4",
            "--db",
            "/tmp/stock.json",
            "--on-corrupt",
            "empty",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/stock.json")));
        assert_eq!(cli.on_corrupt, Some(CorruptPolicy::TreatAsEmpty));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn negative_quantities_do_not_parse() {
        assert!(Cli::try_parse_from(["stockledger", "sell", "Fan", "-3"]).is_err());
        assert!(Cli::try_parse_from(["stockledger", "sell", "Fan", "two"]).is_err());
    }
}
