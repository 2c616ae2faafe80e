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

//! Reports
//!
//! Turns ledgers and accounting results into [Table]s for display.
//!

use crate::accounting::{Currency, PnlRecord, PositionSummary, SalesOverview, TaxSummary};
use crate::ledger::{Ledger, Transaction};
use crate::table::Table;

/// Which transactions to list
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, clap::ValueEnum)]
pub enum Selection {
    #[default]
    All,
    Bought,
    Sold,
}

impl Selection {
    fn matches(self, tx: &Transaction) -> bool {
        match self {
            Selection::All => true,
            Selection::Bought => tx.is_buy(),
            Selection::Sold => tx.is_sell(),
        }
    }

    fn title(self) -> &'static str {
        match self {
            Selection::All => "Transactions",
            Selection::Bought => "Purchases",
            Selection::Sold => "Sales",
        }
    }
}

/// Describes the currency results are shown in, for table titles
fn currency_label(currency: Currency, domestic: &str) -> String {
    match currency {
        Currency::Asset => "in asset currency".into(),
        Currency::Domestic => format!("in {domestic}"),
    }
}

/// Lists the ledger's transactions, optionally restricted to one fiscal year
///
/// In domestic currency the market price is converted at each transaction's
/// exchange rate.
pub fn transactions(
    ledger: &Ledger,
    selection: Selection,
    year: Option<i32>,
    currency: Currency,
    domestic: &str,
) -> Table {
    let title = match year {
        Some(year) => format!(
            "{} {} ({})",
            selection.title(),
            year,
            currency_label(currency, domestic)
        ),
        None => format!(
            "{} ({})",
            selection.title(),
            currency_label(currency, domestic)
        ),
    };
    let mut table = Table::new(
        title,
        &["Date", "Amount", "Market price", "Exchange rate"],
    );
    for tx in ledger
        .iter()
        .filter(|tx| year.map_or(true, |year| tx.year() == year))
        .filter(|tx| selection.matches(tx))
    {
        table.push((
            tx.date,
            tx.amount,
            tx.price * currency.fx_factor(tx),
            tx.fx_rate,
        ));
    }
    table
}

/// Profit and loss of each sale
///
/// In domestic currency the market and acquisition prices are converted at
/// each sale's exchange rate, like the P&L itself.
pub fn profit_and_loss(
    records: &[PnlRecord],
    year: i32,
    currency: Currency,
    domestic: &str,
) -> Table {
    let mut table = Table::new(
        format!(
            "Profit and loss {} ({})",
            year,
            currency_label(currency, domestic)
        ),
        &[
            "Date",
            "Amount",
            "Market price",
            "Exchange rate",
            "Acquisition price",
            "P&L",
        ],
    );
    for rec in records {
        let tx = &rec.transaction;
        let fx_factor = currency.fx_factor(tx);
        table.push((
            tx.date,
            tx.amount,
            tx.price * fx_factor,
            tx.fx_rate,
            rec.acquisition_price * fx_factor,
            rec.pnl,
        ));
    }
    table
}

/// The yearly tax summary
pub fn tax(summary: &TaxSummary, currency: Currency, domestic: &str) -> Table {
    let mut table = Table::new(
        format!(
            "Tax summary {} ({})",
            summary.year,
            currency_label(currency, domestic)
        ),
        &["Amount bought", "Amount sold", "Received", "Paid", "Taxable"],
    );
    table.push((
        summary.bought,
        summary.sold,
        summary.received,
        summary.paid,
        summary.taxable,
    ));
    table
}

/// Position statistics
pub fn statistics(
    summary: &PositionSummary,
    through_year: Option<i32>,
    currency: Currency,
    domestic: &str,
) -> Table {
    let title = match through_year {
        Some(year) => format!(
            "Statistics through {} ({})",
            year,
            currency_label(currency, domestic)
        ),
        None => format!("Statistics ({})", currency_label(currency, domestic)),
    };
    let mut table = Table::new(
        title,
        &[
            "Amount bought",
            "Amount sold",
            "Remaining",
            "Average buying price",
        ],
    );
    table.push((
        summary.bought,
        summary.sold,
        summary.remaining,
        summary.average_buying_price,
    ));
    table
}

/// The quick sales overview
pub fn sales_overview(
    overview: &SalesOverview,
    year: i32,
    currency: Currency,
    domestic: &str,
) -> Table {
    let mut table = Table::new(
        format!(
            "Sales overview {} ({})",
            year,
            currency_label(currency, domestic)
        ),
        &[
            "Bought",
            "Paid",
            "Sold",
            "Received",
            "Acquisition cost",
            "P&L",
        ],
    );
    table.push((
        overview.bought,
        overview.paid,
        overview.sold,
        overview.received,
        overview.acquisition_cost,
        overview.pnl,
    ));
    table
}
