use restock_core::{DomainError, DomainResult, ValueObject};

/// One item's sales history: a quantity per period, in period order.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSeries {
    name: String,
    values: Vec<f64>,
}

impl ItemSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Periods (rows) × items (columns) of historical sales quantities.
///
/// Invariants:
/// - every series has exactly one finite value per period;
/// - no series is empty (a table without periods has no series).
///
/// Series order is the column order of the source table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesTable {
    periods: Vec<String>,
    series: Vec<ItemSeries>,
}

impl ValueObject for SalesTable {}

impl SalesTable {
    /// A table with no usable data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table, validating the shape invariants.
    pub fn new(periods: Vec<String>, series: Vec<ItemSeries>) -> DomainResult<Self> {
        for s in &series {
            if s.values.is_empty() {
                return Err(DomainError::invariant(format!(
                    "series '{}' has no values",
                    s.name
                )));
            }
            if s.values.len() != periods.len() {
                return Err(DomainError::invariant(format!(
                    "series '{}' has {} values for {} periods",
                    s.name,
                    s.values.len(),
                    periods.len()
                )));
            }
            if s.values.iter().any(|v| !v.is_finite()) {
                return Err(DomainError::validation(format!(
                    "series '{}' contains a non-finite value",
                    s.name
                )));
            }
        }

        Ok(Self { periods, series })
    }

    /// Construct from data already known to satisfy the invariants.
    pub(crate) fn from_validated(periods: Vec<String>, series: Vec<ItemSeries>) -> Self {
        debug_assert!(series.iter().all(|s| s.values.len() == periods.len()));
        Self { periods, series }
    }

    /// True when there is nothing to analyze.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    pub fn series(&self) -> &[ItemSeries] {
        &self.series
    }

    /// Item names in column order.
    pub fn item_names(&self) -> Vec<String> {
        self.series.iter().map(|s| s.name.clone()).collect()
    }

    pub fn column(&self, item: &str) -> Option<&ItemSeries> {
        self.series.iter().find(|s| s.name == item)
    }
}
