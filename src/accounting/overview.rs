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

//! Sales Overview
//!
//! A quick estimate of a year's result which does not replay the ledger:
//! the sold units are valued at the average price of *every* purchase in the
//! ledger, including purchases made after the sales. This is only exact when
//! all purchases precede all sales. Use [super::tax_summary] for the real
//! figures.
//!

use super::Currency;
use crate::ledger::Ledger;
use crate::units::{Amount, Price};

/// Overview of the sales made during one fiscal year
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct SalesOverview {
    /// Total amount ever bought
    pub bought: Amount,
    /// Total paid for everything ever bought
    pub paid: Price,
    /// Amount sold during the year (positive)
    pub sold: Amount,
    /// Proceeds of the year's sales
    pub received: Price,
    /// Cost of the units sold, at the overall average purchase price
    pub acquisition_cost: Price,
    /// `received - acquisition_cost`
    pub pnl: Price,
}

/// Computes the sales overview for one fiscal year
pub fn sales_overview(ledger: &Ledger, year: i32, currency: Currency) -> SalesOverview {
    let mut overview = SalesOverview::default();
    for tx in ledger.iter().filter(|tx| tx.is_buy()) {
        overview.bought += tx.amount;
        overview.paid += tx.price * tx.amount * currency.fx_factor(tx);
    }
    for tx in ledger.in_year(year).filter(|tx| tx.is_sell()) {
        overview.sold += tx.amount.abs();
        overview.received += tx.price * tx.amount.abs() * currency.fx_factor(tx);
    }

    // Nothing bought means nothing to value the sales against
    let average = overview
        .paid
        .checked_div(overview.bought)
        .unwrap_or(Price::ZERO);
    overview.acquisition_cost = average * overview.sold;
    overview.pnl = overview.received - overview.acquisition_cost;
    overview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tx;
    use crate::price;
    use rust_decimal_macros::dec;

    #[test]
    fn first_sale_only() {
        let ledger: Ledger = vec![
            tx("2021-01-10", dec!(1), dec!(100), dec!(1)),
            tx("2021-02-10", dec!(2), dec!(100), dec!(1)),
            tx("2021-03-10", dec!(-1), dec!(800), dec!(1)),
            tx("2022-03-10", dec!(-1), dec!(100), dec!(2)),
            tx("2022-04-10", dec!(-1), dec!(300), dec!(2)),
        ]
        .into_iter()
        .collect();

        let overview = sales_overview(&ledger, 2021, Currency::Domestic);
        assert_eq!(overview.bought, Amount::from(dec!(3)));
        assert_eq!(overview.paid, price!(300));
        assert_eq!(overview.sold, Amount::from(dec!(1)));
        assert_eq!(overview.received, price!(800));
        assert_eq!(overview.acquisition_cost, price!(100));
        assert_eq!(overview.pnl, price!(700));

        let overview = sales_overview(&ledger, 2022, Currency::Domestic);
        assert_eq!(overview.sold, Amount::from(dec!(2)));
        assert_eq!(overview.received, price!(800));
        assert_eq!(overview.acquisition_cost, price!(200));
        assert_eq!(overview.pnl, price!(600));
    }

    #[test]
    fn nothing_bought() {
        let ledger: Ledger = vec![tx("2021-03-10", dec!(-1), dec!(800), dec!(1))]
            .into_iter()
            .collect();
        let overview = sales_overview(&ledger, 2021, Currency::Asset);
        assert_eq!(overview.bought, Amount::ZERO);
        assert_eq!(overview.acquisition_cost, Price::ZERO);
        assert_eq!(overview.pnl, price!(800));
    }
}
