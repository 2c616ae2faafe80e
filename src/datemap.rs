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

//! Date Map
//!
//! Append-only collection ordered by date. Several entries may share a date;
//! those are kept in the order they were inserted, so merging input files
//! never reorders same-day trades.
//!

use crate::units::Date;
use std::collections::{btree_map, BTreeMap};

/// Entries ordered by (date, insertion sequence number)
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DateMap<V> {
    entries: BTreeMap<(Date, u64), V>,
    seq: u64,
}

// Deriving would put a Default bound on V
impl<V> Default for DateMap<V> {
    fn default() -> Self {
        DateMap {
            entries: BTreeMap::new(),
            seq: 0,
        }
    }
}

impl<V> DateMap<V> {
    /// Constructs a new empty map
    pub fn new() -> Self {
        Default::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds an entry after every existing entry with the same date
    pub fn insert(&mut self, date: Date, item: V) {
        self.entries.insert((date, self.seq), item);
        self.seq += 1;
    }

    /// Iterates over the entries in order
    pub fn values(&self) -> btree_map::Values<'_, (Date, u64), V> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn ordered_by_date() {
        let mut map = DateMap::new();
        assert!(map.is_empty());
        map.insert(date("2022-11-16"), "c");
        map.insert(date("2021-10-12"), "a");
        map.insert(date("2021-11-12"), "b");
        assert_eq!(map.len(), 3);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(map.values().next_back(), Some(&"c"));
    }

    #[test]
    fn same_date_keeps_insertion_order() {
        let mut map = DateMap::new();
        for (d, n) in [
            ("2021-01-02", 1),
            ("2021-01-01", 2),
            ("2021-01-02", 3),
            ("2021-01-01", 4),
            ("2021-01-02", 5),
        ] {
            map.insert(date(d), n);
        }
        assert_eq!(map.values().copied().collect::<Vec<_>>(), [2, 4, 1, 3, 5]);
    }
}
