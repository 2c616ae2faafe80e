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

//! Price
//!
//! Monetary values. Used both for per-unit prices and for totals (a price
//! multiplied by an amount is again a `Price`), in whichever currency the
//! computation is carried out in.
//!

use crate::units::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, iter, ops, str};

/// A monetary value
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Accessor for the underlying decimal
    pub fn to_decimal(self) -> Decimal {
        self.0
    }

    /// Whether this is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whether this is strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// The absolute value
    pub fn abs(&self) -> Price {
        Price(self.0.abs())
    }

    /// Rounds to the given number of decimal places (banker's rounding)
    pub fn round_dp(&self, dp: u32) -> Price {
        Price(self.0.round_dp(dp))
    }

    /// Divides a total by an amount, yielding a per-unit price
    ///
    /// Returns `None` if the amount is zero.
    pub fn checked_div(&self, amount: Amount) -> Option<Price> {
        self.0.checked_div(amount.to_decimal()).map(Price)
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Price {
        Price(d)
    }
}

impl str::FromStr for Price {
    type Err = rust_decimal::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        str::FromStr::from_str(s).map(Price)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut copy = self.0.round_dp(2);
        copy.rescale(2);
        fmt::Display::fmt(&copy, f)
    }
}

impl ops::Add for Price {
    type Output = Price;
    fn add(self, other: Price) -> Price {
        Price(self.0 + other.0)
    }
}

impl ops::AddAssign for Price {
    fn add_assign(&mut self, other: Price) {
        self.0 += other.0;
    }
}

impl ops::Sub for Price {
    type Output = Price;
    fn sub(self, other: Price) -> Price {
        Price(self.0 - other.0)
    }
}

impl ops::Neg for Price {
    type Output = Price;
    fn neg(self) -> Price {
        Price(-self.0)
    }
}

/// Price times a quantity, e.g. the total cost of a purchase
impl ops::Mul<Amount> for Price {
    type Output = Price;
    fn mul(self, other: Amount) -> Price {
        Price(self.0 * other.to_decimal())
    }
}

/// Price times a scalar, e.g. an exchange rate or a deductible rate
impl ops::Mul<Decimal> for Price {
    type Output = Price;
    fn mul(self, other: Decimal) -> Price {
        Price(self.0 * other)
    }
}

impl iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, |acc, x| acc + x)
    }
}

/// Construct a price from a decimal expression, e.g. price!(100.00) or price!(123)
#[cfg(test)]
#[macro_export]
macro_rules! price {
    ($num:expr) => {
        $num.to_string().parse::<$crate::units::Price>().unwrap()
    };
}
