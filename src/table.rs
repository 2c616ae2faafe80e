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

//! Tables
//!
//! Titled tables of already-formatted cells, displayed as text grids. The
//! same tables can be written as CSV using [crate::csv::CsvPrinter].
//!
//! Rounding happens here and only here: amounts are shown to 6 decimal
//! places, prices and other money values to 2.
//!

use crate::units::{Amount, Date, Price};
use rust_decimal::Decimal;
use std::fmt;

/// Horizontal alignment of a cell
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Align {
    Left,
    Right,
}

/// A single formatted table cell
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cell {
    text: String,
    align: Align,
}

impl Cell {
    /// A left-aligned cell
    pub fn left<D: fmt::Display>(d: D) -> Cell {
        Cell {
            text: d.to_string(),
            align: Align::Left,
        }
    }

    /// A right-aligned cell
    pub fn right<D: fmt::Display>(d: D) -> Cell {
        Cell {
            text: d.to_string(),
            align: Align::Right,
        }
    }

    /// Accessor for the formatted text
    pub fn text(&self) -> &str {
        &self.text
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Trait for values which can be put in a table cell
pub trait ToCell {
    fn to_cell(&self) -> Cell;
}

impl ToCell for Cell {
    fn to_cell(&self) -> Cell {
        self.clone()
    }
}

impl ToCell for &str {
    fn to_cell(&self) -> Cell {
        Cell::left(self)
    }
}

impl ToCell for String {
    fn to_cell(&self) -> Cell {
        Cell::left(self)
    }
}

impl ToCell for Date {
    fn to_cell(&self) -> Cell {
        Cell::left(self)
    }
}

impl ToCell for i32 {
    fn to_cell(&self) -> Cell {
        Cell::right(self)
    }
}

impl ToCell for Amount {
    fn to_cell(&self) -> Cell {
        Cell::right(self)
    }
}

impl ToCell for Price {
    fn to_cell(&self) -> Cell {
        Cell::right(self)
    }
}

/// Bare decimals are exchange rates and are shown like money
impl ToCell for Decimal {
    fn to_cell(&self) -> Cell {
        Cell::right(Price::from(*self))
    }
}

/// Trait for things which make up a single table row
pub trait Row {
    fn cells(&self) -> Vec<Cell>;
}

impl Row for Vec<Cell> {
    fn cells(&self) -> Vec<Cell> {
        self.clone()
    }
}

macro_rules! impl_tuple {
    ($($ty:ident $idx:tt)*) => {
        impl<$($ty: ToCell,)*> Row for ($($ty,)*) {
            fn cells(&self) -> Vec<Cell> {
                vec![$(self.$idx.to_cell(),)*]
            }
        }
    }
}

impl_tuple!(A 0);
impl_tuple!(A 0 B 1);
impl_tuple!(A 0 B 1 C 2);
impl_tuple!(A 0 B 1 C 2 D 3);
impl_tuple!(A 0 B 1 C 2 D 3 E 4);
impl_tuple!(A 0 B 1 C 2 D 3 E 4 F 5);
impl_tuple!(A 0 B 1 C 2 D 3 E 4 F 5 G 6);

/// A table with a title and a header row
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Constructs a new empty table
    pub fn new<S: Into<String>>(title: S, headers: &[&str]) -> Self {
        Table {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: vec![],
        }
    }

    /// Appends a row to the table
    ///
    /// # Panics
    ///
    /// Panics if the row has a different number of cells than there are
    /// headers.
    pub fn push<R: Row>(&mut self, row: R) {
        let cells = row.cells();
        assert_eq!(
            cells.len(),
            self.headers.len(),
            "row width does not match table \"{}\"",
            self.title,
        );
        self.rows.push(cells);
    }

    /// Accessor for the title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Accessor for the column headers
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Accessor for the rows
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }
}

fn write_rule(f: &mut fmt::Formatter, widths: &[usize], fill: char) -> fmt::Result {
    f.write_str("+")?;
    for width in widths {
        for _ in 0..width + 2 {
            write!(f, "{fill}")?;
        }
        f.write_str("+")?;
    }
    writeln!(f)
}

fn write_line<'a, I>(f: &mut fmt::Formatter, widths: &[usize], cells: I) -> fmt::Result
where
    I: Iterator<Item = (&'a str, Align)>,
{
    f.write_str("|")?;
    for (width, (text, align)) in widths.iter().zip(cells) {
        match align {
            Align::Left => write!(f, " {:<width$} |", text, width = width)?,
            Align::Right => write!(f, " {:>width$} |", text, width = width)?,
        }
    }
    writeln!(f)
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let widths = self.column_widths();
        let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;

        let title_width = self.title.chars().count();
        let pad = total.saturating_sub(title_width) / 2;
        writeln!(f, "{:pad$}{}", "", self.title, pad = pad)?;

        write_rule(f, &widths, '-')?;
        write_line(
            f,
            &widths,
            self.headers.iter().map(|h| (h.as_str(), Align::Left)),
        )?;
        write_rule(f, &widths, '=')?;
        for row in &self.rows {
            write_line(f, &widths, row.iter().map(|c| (c.text(), c.align)))?;
            write_rule(f, &widths, '-')?;
        }
        Ok(())
    }
}
