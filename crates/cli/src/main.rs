use clap::Parser;

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    if cli.json_logs {
        stockledger_observability::init_json();
    } else {
        stockledger_observability::init();
    }
    commands::run_command(cli)
}
