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

//! Dates
//!
//! Calendar days. This is a thin wrapper around `chrono::NaiveDate`; the
//! ledger only ever cares about which day (and which fiscal year) a
//! transaction happened on.
//!

use chrono::{Datelike as _, NaiveDate, ParseError};
use core::fmt;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug)]
pub enum Error {
    ParseError(ParseError),
    InvalidYmd(i32, u32, u32),
    UnixTimeOutOfRange(i64),
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Error {
        Error::ParseError(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ParseError(ref e) => fmt::Display::fmt(e, f),
            Error::InvalidYmd(y, m, d) => write!(f, "{y:04}-{m:02}-{d:02} is not a valid date"),
            Error::UnixTimeOutOfRange(n) => {
                write!(f, "timestamp {n} out of range for UNIX timestamp")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::ParseError(ref e) => Some(e),
            Error::InvalidYmd(..) => None,
            Error::UnixTimeOutOfRange(_) => None,
        }
    }
}

/// A calendar day
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Date {
    inner: NaiveDate,
}

impl Date {
    /// Constructs a date from year, month and day
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, Error> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|inner| Date { inner })
            .ok_or(Error::InvalidYmd(year, month, day))
    }

    /// January 1st of the given year
    pub fn start_of_year(year: i32) -> Result<Self, Error> {
        Self::from_ymd(year, 1, 1)
    }

    /// December 31st of the given year
    pub fn end_of_year(year: i32) -> Result<Self, Error> {
        Self::from_ymd(year, 12, 31)
    }

    /// The (UTC) day containing a UNIX timestamp, given in seconds
    pub fn from_unix_i64(n: i64) -> Result<Self, Error> {
        chrono::DateTime::from_timestamp(n, 0)
            .map(|dt| Date {
                inner: dt.date_naive(),
            })
            .ok_or(Error::UnixTimeOutOfRange(n))
    }

    /// Parses a date in `YYYY-MM-DD` format
    ///
    /// A trailing midnight time component (`YYYY-MM-DD 00:00:00`), as produced
    /// by some spreadsheet exports, is also accepted and dropped.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let inner = match NaiveDate::parse_from_str(s, "%F") {
            Ok(date) => date,
            Err(_) => chrono::NaiveDateTime::parse_from_str(s, "%F %T")?.date(),
        };
        Ok(Date { inner })
    }

    /// UNIX timestamp of midnight UTC at the start of this day
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
    }

    /// The following calendar day
    pub fn next_day(&self) -> Option<Self> {
        self.inner.succ_opt().map(|inner| Date { inner })
    }

    /// Accessor for the (fiscal) year
    pub fn year(&self) -> i32 {
        self.inner.year()
    }
}

impl core::str::FromStr for Date {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner.format("%F"), f)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deser: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(deser)?;
        Date::parse(&s).map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Str(&s), &"a date in YYYY-MM-DD format")
        })
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(self)
    }
}
