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

//! CSV
//!
//! Basic support for printing tables in comma-separated-value format
//!

use crate::table::{Cell, Table};
use std::fmt;

/// Trait for objects that can be printed in CSV format
pub trait PrintCsv {
    fn print(&self, f: &mut fmt::Formatter) -> fmt::Result;
}

/// Wrapper around a `PrintCsv` used for println! etc
pub struct CsvPrinter<P: PrintCsv>(pub P);

impl<P: PrintCsv> fmt::Display for CsvPrinter<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.print(f)
    }
}

impl PrintCsv for str {
    fn print(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.contains(|c: char| c == ',' || c == '"' || c == '\n') {
            write!(f, "\"{}\"", self.replace('"', "\"\""))
        } else {
            f.write_str(self)
        }
    }
}

impl PrintCsv for String {
    fn print(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.as_str().print(f)
    }
}

impl PrintCsv for Cell {
    fn print(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text().print(f)
    }
}

impl<P: PrintCsv> PrintCsv for [P] {
    fn print(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut comma = false;
        for item in self {
            if comma {
                f.write_str(",")?;
            }
            item.print(f)?;
            comma = true;
        }
        Ok(())
    }
}

/// A table is printed as a header line followed by one line per row; the
/// title is left out
impl PrintCsv for Table {
    fn print(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.headers().print(f)?;
        writeln!(f)?;
        for row in self.rows() {
            row.as_slice().print(f)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a, P: PrintCsv + ?Sized> PrintCsv for &'a P {
    fn print(&self, f: &mut fmt::Formatter) -> fmt::Result {
        (*self).print(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Amount;
    use rust_decimal_macros::dec;

    #[test]
    fn quoting() {
        assert_eq!(CsvPrinter("plain").to_string(), "plain");
        assert_eq!(CsvPrinter("a,b").to_string(), "\"a,b\"");
        assert_eq!(CsvPrinter("say \"hi\"").to_string(), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn table() {
        let mut table = Table::new("Ignored title", &["Name", "Amount"]);
        table.push(("x, y", Amount::from(dec!(-0.25))));
        table.push(("z", Amount::from(dec!(3))));
        assert_eq!(
            CsvPrinter(&table).to_string(),
            "Name,Amount\n\"x, y\",-0.25\nz,3\n"
        );
    }
}
