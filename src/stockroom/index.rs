//! # Store indexes and snapshots
//!
//! Every view handed to a UI (the full list, a search result, a category
//! filter) is a list of [`DisplayRecord`]s. Each entry carries a copy of the
//! record plus its position in the live store at the time the view was built.
//! Users see that position 1-based, so the first row of the catalog is `1`
//! regardless of which filter is showing.
//!
//! Views go stale as soon as anything mutates the store. Operations that act on
//! a single record therefore take a [`RecordSelector`] and resolve it against
//! the live store right before mutating. A selector built from a displayed row
//! remembers both the slot it was drawn from and the identity (product number
//! and name) it held there. It resolves to that slot while the slot still holds
//! the same record, and otherwise to the one record elsewhere with that
//! identity. Rows that can no longer be told apart resolve to nothing.

use crate::error::{Result, StockError};
use crate::model::Record;
use std::fmt;
use std::str::FromStr;

/// A 1-based position in the live store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreIndex(usize);

impl StoreIndex {
    pub fn from_position(position: usize) -> Self {
        StoreIndex(position + 1)
    }

    /// Zero-based position, or `None` for the invalid index `0`.
    pub fn position(&self) -> Option<usize> {
        self.0.checked_sub(1)
    }

    pub fn number(&self) -> usize {
        self.0
    }
}

impl fmt::Display for StoreIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreIndex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid index format: {}", s))?;
        if n == 0 {
            return Err("Indexes start at 1".to_string());
        }
        Ok(StoreIndex(n))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub record: Record,
    pub index: StoreIndex,
}

impl DisplayRecord {
    /// Selector for acting on this row later.
    pub fn selector(&self) -> RecordSelector {
        RecordSelector::Row {
            index: self.index,
            product_number: self.record.product_number.trim().to_string(),
            name: self.record.name.trim().to_string(),
        }
    }
}

/// The entry at `position`, if the store has one.
pub fn display_at(records: &[Record], position: usize) -> Option<DisplayRecord> {
    records.get(position).map(|record| DisplayRecord {
        record: record.clone(),
        index: StoreIndex::from_position(position),
    })
}

/// Indexes the records that pass `keep`, preserving store order.
pub fn index_records<F>(records: &[Record], keep: F) -> Vec<DisplayRecord>
where
    F: Fn(&Record) -> bool,
{
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| keep(record))
        .map(|(position, record)| DisplayRecord {
            record: record.clone(),
            index: StoreIndex::from_position(position),
        })
        .collect()
}

/// A user's choice of a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    Position(StoreIndex),
    ProductNumber(String),
    Name(String),
    /// A row from a snapshot: where it was, and what it was.
    Row {
        index: StoreIndex,
        product_number: String,
        name: String,
    },
}

impl RecordSelector {
    /// Interprets free-form user input. `#3` is always a store index. Otherwise
    /// an exact product number wins, then a plain number is a store index, and
    /// anything else is a name.
    pub fn parse(input: &str, records: &[Record]) -> Self {
        let trimmed = input.trim();
        if let Some(index) = trimmed
            .strip_prefix('#')
            .and_then(|rest| StoreIndex::from_str(rest).ok())
        {
            return RecordSelector::Position(index);
        }
        if !trimmed.is_empty() && records.iter().any(|r| r.product_number.trim() == trimmed) {
            return RecordSelector::ProductNumber(trimmed.to_string());
        }
        match StoreIndex::from_str(trimmed) {
            Ok(index) => RecordSelector::Position(index),
            Err(_) => RecordSelector::Name(trimmed.to_string()),
        }
    }

    /// Finds the live store position this selector refers to.
    pub fn resolve(&self, records: &[Record]) -> Result<usize> {
        let found = match self {
            RecordSelector::Position(index) => index.position().filter(|p| *p < records.len()),
            RecordSelector::ProductNumber(pn) => {
                let pn = pn.trim();
                records.iter().position(|r| r.product_number.trim() == pn)
            }
            RecordSelector::Name(name) => crate::inventory::find_by_name(records, name),
            RecordSelector::Row {
                index,
                product_number,
                name,
            } => {
                let holds = |record: &Record| same_identity(record, product_number, name);
                index
                    .position()
                    .filter(|p| records.get(*p).is_some_and(holds))
                    .or_else(|| {
                        let mut matches = records
                            .iter()
                            .enumerate()
                            .filter(|(_, record)| holds(*record))
                            .map(|(position, _)| position);
                        match (matches.next(), matches.next()) {
                            (Some(position), None) => Some(position),
                            _ => None,
                        }
                    })
            }
        };
        found.ok_or_else(|| StockError::NotFound(self.to_string()))
    }
}

impl fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSelector::Position(index) => write!(f, "#{}", index),
            RecordSelector::ProductNumber(pn) => write!(f, "product {}", pn),
            RecordSelector::Name(name) => write!(f, "\"{}\"", name),
            RecordSelector::Row { index, name, .. } => write!(f, "#{} \"{}\"", index, name),
        }
    }
}

fn same_identity(record: &Record, product_number: &str, name: &str) -> bool {
    record.product_number.trim() == product_number
        && record.name.trim().to_lowercase() == name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("P1", "Wax A", "Coating & Wax", 5),
            Record::new("P2", "Pad B", "Pads", 2),
            Record::new("", "Cloth", "", 9),
        ]
    }

    #[test]
    fn indexes_are_one_based_store_positions() {
        let records = sample();
        let view = index_records(&records, |r| r.quantity > 3);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].index.number(), 1);
        assert_eq!(view[1].index.number(), 3);
        assert_eq!(view[1].record.name, "Cloth");
    }

    #[test]
    fn parse_prefers_product_number_then_index_then_name() {
        let records = sample();
        assert_eq!(
            RecordSelector::parse("2", &records),
            RecordSelector::Position(StoreIndex(2))
        );
        assert_eq!(
            RecordSelector::parse("#3", &records),
            RecordSelector::Position(StoreIndex(3))
        );
        assert_eq!(
            RecordSelector::parse(" P2 ", &records),
            RecordSelector::ProductNumber("P2".into())
        );
        assert_eq!(
            RecordSelector::parse("wax a", &records),
            RecordSelector::Name("wax a".into())
        );
    }

    #[test]
    fn numeric_product_numbers_win_over_indexes() {
        let records = vec![
            Record::new("2", "Wax A", "", 1),
            Record::new("1", "Pad B", "", 1),
        ];
        let by_text = RecordSelector::parse("1", &records);
        assert_eq!(by_text, RecordSelector::ProductNumber("1".into()));
        assert_eq!(by_text.resolve(&records).unwrap(), 1);

        let by_index = RecordSelector::parse("#1", &records);
        assert_eq!(by_index.resolve(&records).unwrap(), 0);
        assert_eq!(
            RecordSelector::parse("", &[Record::new("", "Loose", "", 1)]),
            RecordSelector::Name(String::new())
        );
    }

    #[test]
    fn zero_is_not_an_index() {
        assert!(StoreIndex::from_str("0").is_err());
        assert_eq!(
            RecordSelector::parse("0", &sample()),
            RecordSelector::Name("0".into())
        );
    }

    #[test]
    fn resolve_finds_live_positions() {
        let records = sample();
        assert_eq!(
            RecordSelector::Position(StoreIndex(3)).resolve(&records).unwrap(),
            2
        );
        assert_eq!(
            RecordSelector::ProductNumber("P2".into())
                .resolve(&records)
                .unwrap(),
            1
        );
        assert_eq!(
            RecordSelector::Name(" CLOTH ".into()).resolve(&records).unwrap(),
            2
        );
    }

    #[test]
    fn resolve_reports_missing_targets() {
        let records = sample();
        let err = RecordSelector::Position(StoreIndex(4))
            .resolve(&records)
            .unwrap_err();
        assert!(matches!(err, StockError::NotFound(_)));
        assert!(RecordSelector::Name("nope".into()).resolve(&records).is_err());
    }

    #[test]
    fn row_selector_survives_reordering() {
        let mut records = sample();
        let view = index_records(&records, |r| r.name == "Pad B");
        let selector = view[0].selector();

        records.swap(0, 1);
        records.insert(0, Record::new("P9", "New", "", 1));

        let position = selector.resolve(&records).unwrap();
        assert_eq!(records[position].name, "Pad B");
    }

    #[test]
    fn row_with_shared_product_number_resolves_to_its_own_slot() {
        let mut records = vec![
            Record::new("P1", "First", "", 1),
            Record::new("P1", "Second", "", 2),
        ];
        let view = index_records(&records, |r| r.name == "Second");
        let selector = view[0].selector();
        assert_eq!(selector.resolve(&records).unwrap(), 1);

        records.remove(0);
        assert_eq!(selector.resolve(&records).unwrap(), 0);
    }

    #[test]
    fn rows_without_product_number_sharing_a_name() {
        let mut records = vec![
            Record::new("", "Cloth", "", 1),
            Record::new("", "Cloth", "", 2),
        ];
        let view = index_records(&records, |_| true);
        assert_eq!(view[1].selector().resolve(&records).unwrap(), 1);

        // slot 1 now holds another record and two rows still match
        records.insert(0, Record::new("P9", "New", "", 1));
        let err = view[0].selector().resolve(&records).unwrap_err();
        assert!(matches!(err, StockError::NotFound(_)));
    }
}
