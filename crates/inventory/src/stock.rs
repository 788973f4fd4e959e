use std::collections::HashMap;

use restock_core::ValueObject;

/// Current stock per item name.
///
/// Items that were never set read as 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockLevels {
    levels: HashMap<String, i64>,
}

impl ValueObject for StockLevels {}

impl StockLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the levels for `items` from raw request fields keyed by item name.
    ///
    /// Missing or non-integer fields become 0.
    pub fn from_fields<I, S>(items: I, fields: &HashMap<String, String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items
            .into_iter()
            .map(|item| {
                let item = item.as_ref();
                let qty = parse_stock(fields.get(item).map(String::as_str));
                (item.to_string(), qty)
            })
            .collect()
    }

    pub fn with(mut self, item: impl Into<String>, qty: i64) -> Self {
        self.set(item, qty);
        self
    }

    pub fn set(&mut self, item: impl Into<String>, qty: i64) {
        self.levels.insert(item.into(), qty);
    }

    /// Stock for `item`, 0 when unknown.
    pub fn get(&self, item: &str) -> i64 {
        self.levels.get(item).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for StockLevels {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        Self {
            levels: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Parse a stock quantity field; anything but an integer reads as 0.
pub fn parse_stock(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)
}
