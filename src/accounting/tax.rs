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

//! Tax Liability
//!
//! The yearly summary that goes into the tax return. Gains are taxable in
//! full; losses only offset gains at the configured deductible rate.
//!

use super::{pnl, Currency, TaxParameters};
use crate::ledger::Ledger;
use crate::units::{Amount, Price};

/// Tax summary of a single fiscal year
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TaxSummary {
    /// Fiscal year
    pub year: i32,
    /// Total amount bought during the year
    pub bought: Amount,
    /// Total amount sold during the year (negative)
    pub sold: Amount,
    /// Proceeds of the year's sales
    pub received: Price,
    /// Acquisition cost of the units sold during the year
    pub paid: Price,
    /// Sum of the taxable contributions of the year's sales
    pub taxable: Price,
}

/// The taxable part of a single sale's profit or loss
pub fn taxable_contribution(pnl: Price, params: &TaxParameters) -> Price {
    if pnl.is_positive() {
        pnl
    } else {
        pnl * params.deductible_rate
    }
}

/// Computes the tax summary for one fiscal year
pub fn tax_summary(
    ledger: &Ledger,
    year: i32,
    currency: Currency,
    params: &TaxParameters,
) -> TaxSummary {
    let mut summary = TaxSummary {
        year,
        ..Default::default()
    };

    for tx in ledger.in_year(year) {
        if tx.is_buy() {
            summary.bought += tx.amount;
        } else if tx.is_sell() {
            summary.sold += tx.amount;
        }
    }

    for rec in pnl::profit_and_loss_in_year(ledger, year, currency) {
        let tx = &rec.transaction;
        let fx_factor = currency.fx_factor(tx);
        summary.received += tx.price * -tx.amount * fx_factor;
        summary.paid += rec.acquisition_price * -tx.amount * fx_factor;
        summary.taxable += taxable_contribution(rec.pnl, params);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tx;
    use crate::price;
    use rust_decimal_macros::dec;

    /// Two purchases and three sales, the first of them in 2021
    fn ledger() -> Ledger {
        vec![
            tx("2021-01-10", dec!(1), dec!(100), dec!(1)),
            tx("2021-02-10", dec!(2), dec!(100), dec!(1)),
            tx("2021-03-10", dec!(-1), dec!(800), dec!(1)),
            tx("2022-03-10", dec!(-1), dec!(100), dec!(2)),
            tx("2022-04-10", dec!(-1), dec!(300), dec!(2)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn first_year() {
        let summary = tax_summary(&ledger(), 2021, Currency::Domestic, &Default::default());
        assert_eq!(summary.year, 2021);
        assert_eq!(summary.bought, Amount::from(dec!(3)));
        assert_eq!(summary.sold, Amount::from(dec!(-1)));
        assert_eq!(summary.received, price!(800));
        assert_eq!(summary.paid, price!(100));
        assert_eq!(summary.taxable, price!(700));
    }

    #[test]
    fn second_year() {
        let ledger = ledger();
        let summary = tax_summary(&ledger, 2022, Currency::Domestic, &Default::default());
        assert_eq!(summary.bought, Amount::ZERO);
        assert_eq!(summary.sold, Amount::from(dec!(-2)));
        assert_eq!(summary.received, price!(800));
        assert_eq!(summary.paid, price!(400));
        // A break-even sale and a gain of 400
        assert_eq!(summary.taxable, price!(400));

        let summary = tax_summary(&ledger, 2022, Currency::Asset, &Default::default());
        assert_eq!(summary.received, price!(400));
        assert_eq!(summary.paid, price!(200));
        assert_eq!(summary.taxable, price!(200));
    }

    #[test]
    fn losses_are_haircut() {
        let ledger: Ledger = vec![
            tx("2023-01-01", dec!(2), dec!(100), dec!(1)),
            tx("2023-06-01", dec!(-1), dec!(50), dec!(1)),
            tx("2023-07-01", dec!(-1), dec!(130), dec!(1)),
        ]
        .into_iter()
        .collect();
        let summary = tax_summary(&ledger, 2023, Currency::Asset, &Default::default());
        // -50 loss of which 70% deductible, 30 gain
        assert_eq!(summary.taxable, price!(-5));

        let full = TaxParameters {
            deductible_rate: dec!(1),
        };
        assert_eq!(tax_summary(&ledger, 2023, Currency::Asset, &full).taxable, price!(-20));
    }

    #[test]
    fn haircut_never_inflates_a_loss() {
        let params = TaxParameters::default();
        for pnl in [price!(-1000), price!(-0.01), price!(0), price!(0.01), price!(250)] {
            let taxable = taxable_contribution(pnl, &params);
            if pnl.is_negative() {
                assert!(taxable.abs() <= pnl.abs());
                assert!(taxable.is_negative());
            } else {
                assert_eq!(taxable, pnl);
            }
        }
    }

    #[test]
    fn empty_year() {
        let summary = tax_summary(&ledger(), 2030, Currency::Asset, &Default::default());
        assert_eq!(
            summary,
            TaxSummary {
                year: 2030,
                ..Default::default()
            }
        );
    }
}
