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

//! Accounting
//!
//! Everything that is computed from a [Ledger](crate::ledger::Ledger): the
//! running weighted-average acquisition price, realized profit and loss of
//! each sale, the yearly tax summary and position statistics.
//!
//! None of this does any I/O. Every function takes the ledger by shared
//! reference and rebuilds whatever running state it needs from scratch, so
//! the results only ever depend on the arguments.
//!

use crate::ledger::Transaction;
use rust_decimal::Decimal;

mod acquisition;
mod overview;
mod pnl;
mod summary;
mod tax;

pub use self::acquisition::{acquisition_prices, track, AcquisitionRecord, PositionState};
pub use self::overview::{sales_overview, SalesOverview};
pub use self::pnl::{profit_and_loss, profit_and_loss_in_year, PnlRecord};
pub use self::summary::{position_summary, PositionSummary};
pub use self::tax::{tax_summary, taxable_contribution, TaxSummary};

/// Which currency monetary results are expressed in
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Currency {
    /// The currency the asset is priced in; exchange rates are ignored
    #[default]
    Asset,
    /// The domestic (tax) currency; values are multiplied by each
    /// transaction's exchange rate
    Domestic,
}

impl Currency {
    /// The factor to convert a value belonging to this transaction into
    /// the target currency
    pub fn fx_factor(self, tx: &Transaction) -> Decimal {
        match self {
            Currency::Asset => Decimal::ONE,
            Currency::Domestic => tx.fx_rate,
        }
    }
}

/// Parameters of the tax regime
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TaxParameters {
    /// Fraction of a loss which may be offset against gains
    pub deductible_rate: Decimal,
}

impl Default for TaxParameters {
    fn default() -> Self {
        TaxParameters {
            deductible_rate: Decimal::new(7, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tx;
    use rust_decimal_macros::dec;

    #[test]
    fn fx_factor() {
        let t = tx("2022-01-01", dec!(-1), dec!(100), dec!(10.5));
        assert_eq!(Currency::Asset.fx_factor(&t), dec!(1));
        assert_eq!(Currency::Domestic.fx_factor(&t), dec!(10.5));
    }

    #[test]
    fn default_deductible_rate() {
        assert_eq!(TaxParameters::default().deductible_rate, dec!(0.7));
    }
}
