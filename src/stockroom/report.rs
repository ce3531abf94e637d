//! Export report composition.
//!
//! [`compose_report`] is pure: it builds an [`ExportEnvelope`] from a list of
//! records and a timestamp, and leaves writing it to the store. A quantity
//! total that does not fit in a `u64` is a validation error.

use crate::error::StockError;
use crate::model::Record;
use chrono::NaiveDateTime;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    #[serde(rename = "Inventory updated as of")]
    pub updated_as_of: String,
    pub summary: Summary,
    pub inventory: Vec<Record>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_items: usize,
    pub total_quantity: u64,
    pub by_category_counts: CategoryMap<usize>,
    pub by_category_products: CategoryMap<Vec<String>>,
}

/// A string-keyed map that keeps keys in first-seen order when written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap<T>(Vec<(String, T)>);

impl<T> Default for CategoryMap<T> {
    fn default() -> Self {
        CategoryMap(Vec::new())
    }
}

impl<T> CategoryMap<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn entry_or(&mut self, key: &str, default: impl FnOnce() -> T) -> &mut T {
        let position = match self.0.iter().position(|(k, _)| k == key) {
            Some(position) => position,
            None => {
                self.0.push((key.to_string(), default()));
                self.0.len() - 1
            }
        };
        &mut self.0[position].1
    }
}

impl<T: Serialize> Serialize for CategoryMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for CategoryMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for CategoryMapVisitor<T> {
            type Value = CategoryMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map keyed by category")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(CategoryMap(entries))
            }
        }

        deserializer.deserialize_map(CategoryMapVisitor(PhantomData))
    }
}

/// One line per product, e.g. `P1 — Wax A (Qty: 5)`.
pub fn product_statement(record: &Record) -> String {
    let product_number = non_blank(&record.product_number).unwrap_or("N/A");
    let name = non_blank(&record.name).unwrap_or("Unnamed");
    format!("{} — {} (Qty: {})", product_number, name, record.quantity)
}

pub fn compose_report(
    records: &[Record],
    timestamp: NaiveDateTime,
) -> crate::error::Result<ExportEnvelope> {
    let mut summary = Summary {
        total_items: records.len(),
        ..Default::default()
    };

    for record in records {
        summary.total_quantity = summary
            .total_quantity
            .checked_add(record.quantity)
            .ok_or_else(|| {
                StockError::InvalidQuantity(format!(
                    "total {} + {}",
                    summary.total_quantity, record.quantity
                ))
            })?;
        let category = non_blank(&record.category).unwrap_or(UNCATEGORIZED);
        *summary.by_category_counts.entry_or(category, || 0) += 1;
        summary
            .by_category_products
            .entry_or(category, Vec::new)
            .push(product_statement(record));
    }

    Ok(ExportEnvelope {
        updated_as_of: timestamp.format(TIMESTAMP_FORMAT).to_string(),
        summary,
        inventory: records.to_vec(),
    })
}

fn non_blank(text: &str) -> Option<&str> {
    Some(text.trim()).filter(|t| !t.is_empty())
}
