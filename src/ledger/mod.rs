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

//! Transaction Ledger
//!
//! The chronological list of buys and sells of the single asset under
//! consideration. Everything in [crate::accounting] is computed from one of
//! these; the ledger itself is never modified once it has been loaded.
//!

use crate::datemap::DateMap;
use crate::units::{Amount, Date, Price};
use rust_decimal::Decimal;
use std::fmt;

pub mod input;

/// A single dated trade
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transaction {
    /// Day the trade took place
    pub date: Date,
    /// Signed amount; positive for buys, negative for sells
    pub amount: Amount,
    /// Market price of the asset, in the currency the asset is priced in
    pub price: Price,
    /// Exchange rate from the asset's currency to the domestic currency
    pub fx_rate: Decimal,
}

impl Transaction {
    /// Whether this transaction increases the position
    pub fn is_buy(&self) -> bool {
        self.amount.is_positive()
    }

    /// Whether this transaction decreases the position
    pub fn is_sell(&self) -> bool {
        self.amount.is_negative()
    }

    /// Accessor for the fiscal year
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} @ {} (fx {})",
            self.date, self.amount, self.price, self.fx_rate
        )
    }
}

/// A ledger, sorted by date
///
/// Transactions on the same day stay in the order they were added.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Ledger {
    transactions: DateMap<Transaction>,
}

impl Ledger {
    /// Constructs a new empty ledger
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a transaction to the ledger
    pub fn insert(&mut self, tx: Transaction) {
        self.transactions.insert(tx.date, tx);
    }

    /// Number of transactions in the ledger
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the ledger has no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Iterates over all transactions in date order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Transaction> + '_ {
        self.transactions.values()
    }

    /// Iterates over the transactions of a single fiscal year
    pub fn in_year(&self, year: i32) -> impl Iterator<Item = &Transaction> + '_ {
        self.iter().filter(move |tx| tx.year() == year)
    }

    /// Iterates over the transactions up to and including the given fiscal
    /// year, or over all transactions if no year is given
    pub fn through_year(&self, year: Option<i32>) -> impl Iterator<Item = &Transaction> + '_ {
        self.iter()
            .filter(move |tx| year.map_or(true, |year| tx.year() <= year))
    }

    /// The first and last fiscal year covered by the ledger
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let first = self.iter().next()?;
        let last = self.iter().next_back()?;
        Some((first.year(), last.year()))
    }
}

impl std::iter::FromIterator<Transaction> for Ledger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        let mut ledger = Ledger::new();
        ledger.extend(iter);
        ledger
    }
}

impl std::iter::Extend<Transaction> for Ledger {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        for tx in iter {
            self.insert(tx);
        }
    }
}

/// Shorthand for constructing transactions in unit tests
#[cfg(test)]
pub fn tx(date: &str, amount: Decimal, price: Decimal, fx_rate: Decimal) -> Transaction {
    Transaction {
        date: date.parse().unwrap(),
        amount: amount.into(),
        price: price.into(),
        fx_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn buy_or_sell() {
        assert!(tx("2021-01-01", dec!(1), dec!(100), dec!(1)).is_buy());
        assert!(!tx("2021-01-01", dec!(1), dec!(100), dec!(1)).is_sell());
        assert!(tx("2021-01-01", dec!(-1), dec!(100), dec!(1)).is_sell());
        let zero = tx("2021-01-01", dec!(0), dec!(100), dec!(1));
        assert!(!zero.is_buy() && !zero.is_sell());
    }

    #[test]
    fn sorted_and_stable() {
        let ledger: Ledger = vec![
            tx("2022-11-16", dec!(-0.4), dec!(100000), dec!(1)),
            tx("2021-10-12", dec!(0.5), dec!(40000), dec!(1)),
            tx("2021-10-12", dec!(0.2), dec!(50000), dec!(1)),
        ]
        .into_iter()
        .collect();

        let amounts: Vec<_> = ledger.iter().map(|tx| tx.amount.to_string()).collect();
        assert_eq!(amounts, ["0.5", "0.2", "-0.4"]);
        assert_eq!(ledger.year_range(), Some((2021, 2022)));
    }

    #[test]
    fn year_filters() {
        let ledger: Ledger = vec![
            tx("2020-06-01", dec!(1), dec!(1), dec!(1)),
            tx("2021-06-01", dec!(1), dec!(1), dec!(1)),
            tx("2021-12-31", dec!(-1), dec!(1), dec!(1)),
            tx("2022-01-01", dec!(1), dec!(1), dec!(1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(ledger.in_year(2021).count(), 2);
        assert_eq!(ledger.in_year(2019).count(), 0);
        assert_eq!(ledger.through_year(Some(2021)).count(), 3);
        assert_eq!(ledger.through_year(None).count(), 4);
        assert_eq!(Ledger::new().year_range(), None);
    }
}
