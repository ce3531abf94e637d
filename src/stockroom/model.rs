use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories with a fixed sort precedence. Anything else sorts after these.
pub const KNOWN_CATEGORIES: [&str; 4] = ["Coating & Wax", "Maintenance", "Pads", "Accessories"];

/// One inventory line item.
///
/// `quantity` is kept as an integer in memory but written as a string of
/// digits, which is the shape the data file has always used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub product_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, with = "quantity_text")]
    pub quantity: u64,
}

impl Record {
    pub fn new(
        product_number: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: u64,
    ) -> Self {
        Self {
            product_number: product_number.into(),
            name: name.into(),
            category: category.into(),
            quantity,
        }
    }

    /// Rank of the category in [`KNOWN_CATEGORIES`]; unknown ones share the last rank.
    pub fn category_rank(&self) -> usize {
        KNOWN_CATEGORIES
            .iter()
            .position(|known| *known == self.category)
            .unwrap_or(KNOWN_CATEGORIES.len())
    }
}

/// Raw form input for an add, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub product_number: String,
    pub name: String,
    pub category: String,
    pub quantity: String,
}

impl RecordDraft {
    pub fn new(
        product_number: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            product_number: product_number.into(),
            name: name.into(),
            category: category.into(),
            quantity: quantity.into(),
        }
    }

    /// Checks the fields an add needs, in the order a form reports them,
    /// and returns the parsed quantity.
    pub fn validate(&self) -> Result<u64> {
        if self.name.trim().is_empty() {
            return Err(StockError::MissingField("Name"));
        }
        if self.quantity.trim().is_empty() {
            return Err(StockError::MissingField("Quantity"));
        }
        let quantity = parse_quantity(&self.quantity)?;
        if self.product_number.trim().is_empty() {
            return Err(StockError::MissingField("Product Number"));
        }
        Ok(quantity)
    }
}

/// Partial update. Blank fields leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub product_number: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        [
            &self.product_number,
            &self.name,
            &self.category,
            &self.quantity,
        ]
        .iter()
        .all(|field| present(field).is_none())
    }
}

/// Returns the trimmed value when the field carries any text.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parses user-entered quantity text: digits only, no sign.
pub fn parse_quantity(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(StockError::InvalidQuantity(trimmed.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| StockError::InvalidQuantity(trimmed.to_string()))
}

/// Keys the catalog can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    ProductNumber,
    Quantity,
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::ProductNumber,
        SortKey::Quantity,
        SortKey::Category,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::ProductNumber => "product_number",
            SortKey::Quantity => "quantity",
            SortKey::Category => "category",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(SortKey::Name),
            "product_number" | "product" | "pn" => Ok(SortKey::ProductNumber),
            "quantity" | "qty" => Ok(SortKey::Quantity),
            "category" => Ok(SortKey::Category),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

mod quantity_text {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(quantity: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&quantity.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }

    struct QuantityVisitor;

    impl<'de> Visitor<'de> for QuantityVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or a string of digits")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("negative quantity {}", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            super::parse_quantity(v).map_err(E::custom)
        }
    }
}
