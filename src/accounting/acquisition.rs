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

//! Acquisition Cost
//!
//! Tracks the weighted-average acquisition price of the held position as the
//! ledger is replayed from the start.
//!
//! Buying changes the average: the new average is the old one and the
//! purchase price, weighted by the amount held before and the amount bought.
//! Selling realizes a gain or loss against the average but leaves the average
//! of what remains untouched.
//!

use crate::ledger::{Ledger, Transaction};
use crate::units::{Amount, Price};
use log::{debug, warn};

/// Running state of the position while the ledger is replayed
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct PositionState {
    /// Amount of the asset currently held
    pub held_amount: Amount,
    /// Weighted-average cost per unit of `held_amount`
    pub acquisition_price: Price,
}

impl PositionState {
    /// The state before any transaction: nothing held, no cost basis
    pub fn new() -> Self {
        Default::default()
    }

    /// The state after the first transaction of a ledger
    ///
    /// The position is seeded with the transaction's signed price: a buy
    /// opens at its price, a sale at the negated price.
    pub fn opening(tx: &Transaction) -> PositionState {
        let acquisition_price = if tx.is_buy() {
            tx.price
        } else if tx.is_sell() {
            -tx.price
        } else {
            Price::ZERO
        };
        PositionState {
            held_amount: tx.amount,
            acquisition_price,
        }
    }

    /// Applies a single transaction, returning the updated state
    ///
    /// A sale that exceeds the held amount is not rejected; the held amount
    /// simply goes negative and a warning is logged.
    pub fn apply(self, tx: &Transaction) -> PositionState {
        let previous_held = self.held_amount;
        let held_amount = previous_held + tx.amount;

        let acquisition_price = if tx.is_buy() {
            weighted_average(self.acquisition_price, previous_held, tx.price, tx.amount)
        } else {
            if tx.is_sell() && held_amount.is_negative() {
                warn!(
                    "sale of {} on {} exceeds the {} held; position is now {}",
                    tx.amount.abs(),
                    tx.date,
                    previous_held,
                    held_amount,
                );
            }
            self.acquisition_price
        };

        PositionState {
            held_amount,
            acquisition_price,
        }
    }
}

/// Average of two prices weighted by the amounts they apply to
///
/// If nothing was held before (or the weights cancel out, which can only happen
/// when buying back into an oversold position exactly to zero) the result is
/// just the purchase price.
fn weighted_average(average: Price, held: Amount, price: Price, bought: Amount) -> Price {
    if held.is_zero() {
        return price;
    }
    (average * held + price * bought)
        .checked_div(held + bought)
        .unwrap_or(price)
}

/// The position as of a single transaction
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AcquisitionRecord {
    /// The transaction
    pub transaction: Transaction,
    /// Weighted-average acquisition price immediately after the transaction
    pub acquisition_price: Price,
}

/// Replays the whole ledger, annotating every transaction with the
/// acquisition price of the position immediately after it
///
/// Returns one record per transaction, in ledger order, along with the final
/// state of the position.
pub fn track(ledger: &Ledger) -> (Vec<AcquisitionRecord>, PositionState) {
    let (records, state) = ledger.iter().fold(
        (Vec::with_capacity(ledger.len()), None),
        |(mut records, state): (Vec<AcquisitionRecord>, Option<PositionState>), tx| {
            let state = match state {
                Some(state) => state.apply(tx),
                None => PositionState::opening(tx),
            };
            records.push(AcquisitionRecord {
                transaction: *tx,
                acquisition_price: state.acquisition_price,
            });
            (records, Some(state))
        },
    );
    let state = state.unwrap_or_default();
    debug!(
        "tracked {} transactions; holding {} at average price {}",
        records.len(),
        state.held_amount,
        state.acquisition_price,
    );
    (records, state)
}

/// The acquisition price after each transaction of the ledger, in order
pub fn acquisition_prices(ledger: &Ledger) -> Vec<Price> {
    track(ledger)
        .0
        .into_iter()
        .map(|record| record.acquisition_price)
        .collect()
}
