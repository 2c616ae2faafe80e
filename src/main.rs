// CIT - Capital Income Tax
// Written in 2024 by
//   The CIT developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! CIT
//!
//! Capital income tax calculator for cryptocurrencies. Reads a ledger of
//! buys and sells of a single asset and reports acquisition prices, realized
//! profit and loss, and the yearly taxable amount.
//!

pub mod accounting;
pub mod config;
pub mod csv;
pub mod datemap;
pub mod file;
pub mod http;
pub mod ledger;
pub mod logger;
pub mod market_data;
pub mod report;
pub mod table;
pub mod units;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;

use accounting::Currency;
use config::Configuration;
use csv::CsvPrinter;
use ledger::Ledger;
use market_data::{PriceSource, Yahoo};
use report::Selection;
use table::Table;

static DISCLAIMER: &str = "\
+--------------------------------------------------+
|                     WARRANTY                     |
+--------------------------------------------------+
| This program is provided \"as is\" without any     |
| warranty of any kind, express or implied,        |
| including the implied warranties of              |
| merchantability and fitness for a particular     |
| purpose. You use it at your own risk; check      |
| every figure before filing a tax return.         |
+--------------------------------------------------+";

#[derive(Parser)]
#[command(
    name = "cit",
    version,
    about = "CIT is a Capital Income Tax calculator for cryptocurrencies."
)]
struct Cli {
    /// Configuration file (defaults to <config dir>/cit/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Suppress the warranty disclaimer
    #[arg(short, long, global = true)]
    mute: bool,
    /// Print tables as CSV rather than as text grids
    #[arg(long, global = true)]
    csv: bool,
    /// Show informational log messages
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Also write a detailed log to this file
    #[arg(long, global = true)]
    debug_log: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command which reads a ledger
#[derive(Args)]
struct Inputs {
    /// Input file, relative to the data directory; may be repeated to merge
    /// several files
    #[arg(short = 'f', long = "file")]
    files: Vec<String>,
    /// Show money in the domestic currency rather than the asset's currency
    #[arg(short, long)]
    ccy: bool,
}

impl Inputs {
    fn currency(&self) -> Currency {
        if self.ccy {
            Currency::Domestic
        } else {
            Currency::Asset
        }
    }

    /// Loads and merges the input files, or the configured default file if
    /// none were given
    fn load(&self, config: &Configuration, source: &dyn PriceSource) -> anyhow::Result<Ledger> {
        let ledger = if self.files.is_empty() {
            ledger::input::load_ledger(&[config.input_file()], config, source)?
        } else {
            ledger::input::load_ledger(self.files.as_slice(), config, source)?
        };
        if ledger.is_empty() {
            warn!("No transactions found.");
        } else if let Some((first, last)) = ledger.year_range() {
            info!("Loaded {} transactions, {}-{}", ledger.len(), first, last);
        }
        Ok(ledger)
    }
}

#[derive(Subcommand)]
enum Command {
    /// List transactions
    List {
        #[arg(value_enum, default_value_t = Selection::All)]
        selection: Selection,
        /// Only list transactions of this fiscal year
        #[arg(short, long)]
        year: Option<i32>,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Show the profit and loss of each sale in a fiscal year
    Pnl {
        year: i32,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Show the tax summary of a fiscal year
    Tax {
        year: i32,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Show position statistics
    Stats {
        /// Only consider transactions up to the end of this fiscal year
        #[arg(short, long)]
        year: Option<i32>,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Estimate a fiscal year's result from the overall average purchase price
    Overview {
        year: i32,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Write the merged transactions, with prices filled in, to a new file
    Export {
        outfile: String,
        #[command(flatten)]
        inputs: Inputs,
    },
}

fn print_table(table: &Table, csv: bool) {
    if csv {
        print!("{}", CsvPrinter(table));
    } else {
        println!("{}", table);
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    match cli.debug_log {
        Some(ref path) => logger::Logger::init(path, cli.verbose)
            .with_context(|| format!("opening debug log {}", path.to_string_lossy()))?,
        None => logger::Logger::init_terminal_only(cli.verbose)?,
    }

    // Keep CSV output machine-readable
    if !cli.mute && !cli.csv {
        println!("{}", DISCLAIMER);
        println!();
    }

    let config = Configuration::find(cli.config.as_deref()).context("loading configuration")?;
    let source = Yahoo::new(config.market_data_url());
    let domestic = config.domestic_currency();

    match cli.command {
        Command::List {
            selection,
            year,
            inputs,
        } => {
            let ledger = inputs.load(&config, &source)?;
            let table =
                report::transactions(&ledger, selection, year, inputs.currency(), domestic);
            print_table(&table, cli.csv);
        }
        Command::Pnl { year, inputs } => {
            let ledger = inputs.load(&config, &source)?;
            let currency = inputs.currency();
            let records = accounting::profit_and_loss_in_year(&ledger, year, currency);
            if records.is_empty() {
                warn!("No sales in {}.", year);
            }
            let table = report::profit_and_loss(&records, year, currency, domestic);
            print_table(&table, cli.csv);
        }
        Command::Tax { year, inputs } => {
            let ledger = inputs.load(&config, &source)?;
            let currency = inputs.currency();
            let summary =
                accounting::tax_summary(&ledger, year, currency, &config.tax_parameters());
            print_table(&report::tax(&summary, currency, domestic), cli.csv);
        }
        Command::Stats { year, inputs } => {
            let ledger = inputs.load(&config, &source)?;
            let currency = inputs.currency();
            let summary = accounting::position_summary(&ledger, year, currency);
            print_table(
                &report::statistics(&summary, year, currency, domestic),
                cli.csv,
            );
        }
        Command::Overview { year, inputs } => {
            let ledger = inputs.load(&config, &source)?;
            let currency = inputs.currency();
            let overview = accounting::sales_overview(&ledger, year, currency);
            print_table(
                &report::sales_overview(&overview, year, currency, domestic),
                cli.csv,
            );
        }
        Command::Export { outfile, inputs } => {
            let ledger = inputs.load(&config, &source)?;
            ledger::input::export_json(&ledger, outfile, &config)?;
        }
    }

    log::Log::flush(log::logger());
    Ok(())
}
