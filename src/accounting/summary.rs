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

//! Position Summary
//!

use super::{acquisition, Currency};
use crate::ledger::Ledger;
use crate::units::{Amount, Price};

/// Statistics of the position up to the end of some fiscal year
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct PositionSummary {
    /// Total amount bought
    pub bought: Amount,
    /// Total amount sold (negative)
    pub sold: Amount,
    /// Amount still held, `bought + sold`
    pub remaining: Amount,
    /// Acquisition price of the position after the last transaction
    pub average_buying_price: Price,
}

/// Summarizes the position through the end of `through_year`, or through the
/// last transaction if no year is given
///
/// In domestic currency the average buying price is converted at the last
/// exchange rate seen in the window. With no transactions in the window the
/// average buying price is zero.
pub fn position_summary(
    ledger: &Ledger,
    through_year: Option<i32>,
    currency: Currency,
) -> PositionSummary {
    let mut summary = PositionSummary::default();
    for tx in ledger.through_year(through_year) {
        if tx.is_buy() {
            summary.bought += tx.amount;
        } else if tx.is_sell() {
            summary.sold += tx.amount;
        }
    }
    summary.remaining = summary.bought + summary.sold;

    let (records, _) = acquisition::track(ledger);
    let last = records
        .iter()
        .rev()
        .find(|rec| through_year.map_or(true, |year| rec.transaction.year() <= year));
    if let Some(last) = last {
        summary.average_buying_price =
            last.acquisition_price * currency.fx_factor(&last.transaction);
    }
    summary
}
