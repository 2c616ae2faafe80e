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

//! Amounts
//!
//! Signed quantities of the traded asset. Positive amounts are purchases,
//! negative amounts are sales.
//!

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, iter, ops, str};

/// A (signed) quantity of the asset
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Accessor for the underlying decimal
    pub fn to_decimal(self) -> Decimal {
        self.0
    }

    /// Whether this is a purchase-sized (strictly positive) amount
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whether this is a sale-sized (strictly negative) amount
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Whether this represents zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The absolute value of an amount
    pub fn abs(&self) -> Amount {
        Amount(self.0.abs())
    }

    /// Rounds to the given number of decimal places (banker's rounding)
    pub fn round_dp(&self, dp: u32) -> Amount {
        Amount(self.0.round_dp(dp))
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Amount {
        Amount(d)
    }
}

impl str::FromStr for Amount {
    type Err = rust_decimal::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        str::FromStr::from_str(s).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0.round_dp(6).normalize(), f)
    }
}

impl ops::Add for Amount {
    type Output = Amount;
    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, other: Amount) {
        self.0 += other.0;
    }
}

impl ops::Sub for Amount {
    type Output = Amount;
    fn sub(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }
}

impl ops::Neg for Amount {
    type Output = Amount;
    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, x| acc + x)
    }
}
