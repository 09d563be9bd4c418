use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use crate::config::Config;
use crate::controller::EntryForm;
use crate::ledger::LedgerStore;

mod config;
mod controller;
mod error;
mod export;
mod ledger;
mod report;
mod transaction;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Ledger csv file path. Overrides the config file
    #[clap(short, long)]
    file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record an operation
    Add {
        /// Operation date, AAAA-MM-JJ. Today when omitted
        #[clap(long)]
        date: Option<String>,

        /// Operation kind: recette or depense
        #[clap(long = "type")]
        kind: String,

        /// Amount in euros
        #[clap(long)]
        amount: f64,

        /// Free-text category
        #[clap(long)]
        category: String,

        /// VAT rate in percent
        #[clap(long, default_value_t = 0.0)]
        vat: f64,

        /// Free-text description
        #[clap(long, default_value = "")]
        description: String,
    },

    /// Print totals, monthly cashflow and the balance sheet
    Report,

    /// Write the two-sheet Excel export
    Export {
        /// Output path. Defaults to vitecompta_export.xlsx
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    let config = Config::load_default();
    let data_file = cli
        .file
        .clone()
        .or_else(|| config.data_file.clone())
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_DATA_FILE));
    let store = LedgerStore::new(data_file);

    if let Err(err) = run(&store, cli.command) {
        println!("{err}");
        std::process::exit(1);
    }
}

fn run(store: &LedgerStore, command: Command) -> anyhow::Result<()> {
    store.initialize()?;
    info!("Using ledger file {}", store.path().display());

    match command {
        Command::Add { date, kind, amount, category, vat, description } => controller::add(
            store,
            EntryForm { date, kind, amount, category, vat_rate: vat, description },
        ),
        Command::Report => controller::report(store),
        Command::Export { output } => controller::export(store, output.as_deref()),
    }
}
