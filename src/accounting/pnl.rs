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

//! Profit and Loss
//!
//! Realized profit and loss of every sale, measured against the acquisition
//! price of the position at the time of the sale. Purchases realize nothing
//! and have no PNL record.
//!

use super::{acquisition, Currency};
use crate::ledger::{Ledger, Transaction};
use crate::units::Price;

/// Realized profit or loss of a single sale
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PnlRecord {
    /// The sale
    pub transaction: Transaction,
    /// Acquisition price of the position the units were sold from
    pub acquisition_price: Price,
    /// Proceeds minus cost of the units sold; positive for a gain
    pub pnl: Price,
}

impl PnlRecord {
    fn from_sale(record: &acquisition::AcquisitionRecord, currency: Currency) -> PnlRecord {
        let tx = &record.transaction;
        let pnl = (tx.price - record.acquisition_price) * -tx.amount * currency.fx_factor(tx);
        PnlRecord {
            transaction: *tx,
            acquisition_price: record.acquisition_price,
            pnl,
        }
    }
}

/// Profit and loss of every sale in the ledger
pub fn profit_and_loss(ledger: &Ledger, currency: Currency) -> Vec<PnlRecord> {
    let (records, _) = acquisition::track(ledger);
    records
        .iter()
        .filter(|record| record.transaction.is_sell())
        .map(|record| PnlRecord::from_sale(record, currency))
        .collect()
}

/// Profit and loss of the sales made during a single fiscal year
///
/// Acquisition prices still take the full history into account.
pub fn profit_and_loss_in_year(ledger: &Ledger, year: i32, currency: Currency) -> Vec<PnlRecord> {
    profit_and_loss(ledger, currency)
        .into_iter()
        .filter(|record| record.transaction.year() == year)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tx;
    use crate::price;
    use rust_decimal_macros::dec;

    fn ledger() -> Ledger {
        vec![
            tx("2021-10-12", dec!(0.5), dec!(40000), dec!(8.77)),
            tx("2021-11-12", dec!(0.5), dec!(50000), dec!(8.71)),
            tx("2021-12-01", dec!(-0.25), dec!(30000), dec!(9)),
            tx("2022-11-16", dec!(-0.5), dec!(100000), dec!(10.46)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn only_sales() {
        let pnl = profit_and_loss(&ledger(), Currency::Asset);
        assert_eq!(pnl.len(), 2);
        assert!(pnl.iter().all(|rec| rec.transaction.is_sell()));

        assert_eq!(pnl[0].acquisition_price, price!(45000));
        assert_eq!(pnl[0].pnl, price!(-3750));
        assert_eq!(pnl[1].acquisition_price, price!(45000));
        assert_eq!(pnl[1].pnl, price!(27500));
    }

    #[test]
    fn sign_matches_price_vs_cost() {
        for rec in profit_and_loss(&ledger(), Currency::Domestic) {
            let tx = rec.transaction;
            assert_eq!(rec.pnl.is_positive(), tx.price > rec.acquisition_price);
            assert_eq!(rec.pnl.is_negative(), tx.price < rec.acquisition_price);
        }
    }

    #[test]
    fn domestic_currency() {
        let pnl = profit_and_loss(&ledger(), Currency::Domestic);
        assert_eq!(pnl[0].pnl, price!(-33750));
        assert_eq!(pnl[1].pnl, price!(287650));
    }

    #[test]
    fn leading_sale() {
        let ledger: Ledger = vec![
            tx("2021-01-01", dec!(-1), dec!(100), dec!(1)),
            tx("2021-02-01", dec!(3), dec!(50), dec!(1)),
            tx("2021-03-01", dec!(-1), dec!(200), dec!(1)),
        ]
        .into_iter()
        .collect();
        let pnl = profit_and_loss(&ledger, Currency::Asset);
        assert_eq!(pnl[0].acquisition_price, price!(-100));
        assert_eq!(pnl[0].pnl, price!(200));
        assert_eq!(pnl[1].acquisition_price, price!(125));
        assert_eq!(pnl[1].pnl, price!(75));
    }

    #[test]
    fn per_year() {
        let ledger = ledger();
        let pnl_2022 = profit_and_loss_in_year(&ledger, 2022, Currency::Asset);
        assert_eq!(pnl_2022.len(), 1);
        assert_eq!(pnl_2022[0].transaction.date.to_string(), "2022-11-16");
        // Cost basis still comes from the 2021 purchases
        assert_eq!(pnl_2022[0].acquisition_price, price!(45000));

        assert_eq!(profit_and_loss_in_year(&ledger, 2021, Currency::Asset).len(), 1);
        assert!(profit_and_loss_in_year(&ledger, 2020, Currency::Asset).is_empty());
    }
}
