//! # Inventory Store
//!
//! [`Inventory`] is the single writable copy of the catalog: an
//! insertion-ordered list of [`Record`]s. Every mutating method validates
//! everything it needs before touching the list, so a call either fully
//! applies or leaves the store exactly as it was.
//!
//! Views for display (search results, category filters, the full listing) are
//! built from here as [`DisplayRecord`] snapshots; see [`crate::index`].

use crate::error::{Result, StockError};
use crate::index::{index_records, DisplayRecord};
use crate::model::{
    parse_quantity, present, Record, RecordDraft, RecordPatch, SortKey, KNOWN_CATEGORIES,
};
use crate::sort::{self, SortStats};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// What to do when an added record's name is already in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Add the new quantity onto the existing record.
    Merge,
    /// Leave the catalog untouched.
    Decline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(usize),
    Merged { position: usize, quantity: u64 },
    Cancelled,
}

/// Records recovered from a data file, plus how many entries were unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedInventory {
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// Position of the first record whose trimmed, lowercased name equals `name`'s.
pub fn find_by_name(records: &[Record], name: &str) -> Option<usize> {
    let target = name.trim().to_lowercase();
    records
        .iter()
        .position(|record| record.name.trim().to_lowercase() == target)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<Record>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        find_by_name(&self.records, name)
    }

    pub fn add(&mut self, draft: &RecordDraft, on_duplicate: MergeDecision) -> Result<AddOutcome> {
        let quantity = draft.validate()?;
        let name = draft.name.trim();
        let product_number = draft.product_number.trim();

        if let Some(position) = self.find_by_name(name) {
            if on_duplicate == MergeDecision::Decline {
                return Ok(AddOutcome::Cancelled);
            }
            let existing = &mut self.records[position];
            let merged = existing.quantity.checked_add(quantity).ok_or_else(|| {
                StockError::InvalidQuantity(format!("{} + {}", existing.quantity, quantity))
            })?;
            existing.quantity = merged;
            info!(name, quantity = merged, "merged quantity into existing record");
            return Ok(AddOutcome::Merged {
                position,
                quantity: merged,
            });
        }

        self.ensure_unique_product_number(product_number, None)?;
        self.records.push(Record::new(
            product_number,
            name,
            draft.category.trim(),
            quantity,
        ));
        info!(product_number, name, "added record");
        Ok(AddOutcome::Added(self.records.len() - 1))
    }

    pub fn update(&mut self, position: usize, patch: &RecordPatch) -> Result<&Record> {
        if position >= self.records.len() {
            return Err(StockError::NotFound(format!("position {}", position + 1)));
        }

        let product_number = present(&patch.product_number);
        if let Some(pn) = product_number {
            self.ensure_unique_product_number(pn, Some(position))?;
        }
        let quantity = present(&patch.quantity).map(parse_quantity).transpose()?;

        let record = &mut self.records[position];
        if let Some(name) = present(&patch.name) {
            record.name = name.to_string();
        }
        if let Some(category) = present(&patch.category) {
            record.category = category.to_string();
        }
        if let Some(pn) = product_number {
            record.product_number = pn.to_string();
        }
        if let Some(quantity) = quantity {
            record.quantity = quantity;
        }
        info!(position, "updated record");
        Ok(&self.records[position])
    }

    pub fn delete(&mut self, position: usize) -> Result<Record> {
        if position >= self.records.len() {
            return Err(StockError::NotFound(format!("position {}", position + 1)));
        }
        let removed = self.records.remove(position);
        info!(name = %removed.name, "deleted record");
        Ok(removed)
    }

    /// Empties the catalog and reports how many records went.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        info!(count, "cleared inventory");
        count
    }

    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn order_by(&mut self, key: SortKey) -> SortStats {
        sort::order_by(&mut self.records, key)
    }

    pub fn snapshot(&self) -> Vec<DisplayRecord> {
        index_records(&self.records, |_| true)
    }

    /// Case-insensitive substring match on name or product number.
    pub fn filter_substring(&self, keyword: &str) -> Vec<DisplayRecord> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return self.snapshot();
        }
        index_records(&self.records, |record| {
            record.name.to_lowercase().contains(&keyword)
                || record.product_number.to_lowercase().contains(&keyword)
        })
    }

    /// Case-insensitive exact match on category.
    pub fn filter_category(&self, category: &str) -> Vec<DisplayRecord> {
        let wanted = category.trim().to_lowercase();
        if wanted.is_empty() {
            return self.snapshot();
        }
        index_records(&self.records, |record| {
            record.category.trim().to_lowercase() == wanted
        })
    }

    /// Known categories first, then any others present, alphabetically.
    pub fn categories(&self) -> Vec<String> {
        let extra: BTreeSet<&str> = self
            .records
            .iter()
            .map(|record| record.category.trim())
            .filter(|category| {
                !category.is_empty() && !KNOWN_CATEGORIES.iter().any(|known| known == category)
            })
            .collect();
        KNOWN_CATEGORIES
            .iter()
            .map(|known| known.to_string())
            .chain(extra.into_iter().map(str::to_string))
            .collect()
    }

    /// Product numbers that appear on more than one record.
    pub fn duplicate_product_numbers(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut dupes = BTreeSet::new();
        for pn in self.records.iter().map(|r| r.product_number.trim()) {
            if !pn.is_empty() && !seen.insert(pn) {
                dupes.insert(pn.to_string());
            }
        }
        dupes.into_iter().collect()
    }

    fn ensure_unique_product_number(&self, pn: &str, skip: Option<usize>) -> Result<()> {
        let taken = self
            .records
            .iter()
            .enumerate()
            .any(|(i, record)| Some(i) != skip && record.product_number.trim() == pn);
        if taken {
            return Err(StockError::DuplicateProductNumber(pn.to_string()));
        }
        Ok(())
    }
}

/// Pulls records out of either persisted shape: a bare array, or an export
/// envelope with an `"inventory"` array.
pub fn from_json(value: Value) -> Result<LoadedInventory> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("inventory") {
            Some(Value::Array(entries)) => entries,
            Some(Value::Null) => Vec::new(),
            Some(_) => {
                return Err(StockError::Format(
                    "\"inventory\" is not a list".to_string(),
                ))
            }
            None => {
                return Err(StockError::Format(
                    "object has no \"inventory\" key".to_string(),
                ))
            }
        },
        other => {
            return Err(StockError::Format(format!(
                "expected a list or an export object, found {}",
                json_type(&other)
            )))
        }
    };

    let mut loaded = LoadedInventory::default();
    for entry in entries {
        match entry {
            Value::Object(object) => match record_from_object(&object) {
                Some(record) => loaded.records.push(record),
                None => loaded.skipped += 1,
            },
            _ => loaded.skipped += 1,
        }
    }
    if loaded.skipped > 0 {
        warn!(skipped = loaded.skipped, "dropped unusable entries while loading");
    }
    Ok(loaded)
}

fn record_from_object(object: &Map<String, Value>) -> Option<Record> {
    let quantity = match object.get("quantity") {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) => n.as_u64()?,
        Some(Value::String(s)) => parse_quantity(s).ok()?,
        Some(_) => return None,
    };
    Some(Record {
        product_number: text_field(object, "product_number"),
        name: text_field(object, "name"),
        category: text_field(object, "category"),
        quantity,
    })
}

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
