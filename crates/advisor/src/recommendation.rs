use serde::{Deserialize, Serialize};

/// What to do about one item's stock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// At or below safety stock.
    Critical,
    /// Above safety stock, at or below the reorder point.
    ReorderSoon,
    Safe,
}

impl Recommendation {
    /// Ordered rule evaluation; the first matching threshold wins.
    pub fn classify(current_stock: i64, safety_stock: i64, reorder_point: i64) -> Self {
        if current_stock <= safety_stock {
            Recommendation::Critical
        } else if current_stock <= reorder_point {
            Recommendation::ReorderSoon
        } else {
            Recommendation::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Critical => "critical",
            Recommendation::ReorderSoon => "reorder_soon",
            Recommendation::Safe => "safe",
        }
    }

    /// Human-readable label, as shown to operators and in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Critical => "critical, reorder immediately",
            Recommendation::ReorderSoon => "reorder soon (below reorder point)",
            Recommendation::Safe => "stock safe",
        }
    }
}

impl core::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-item outcome of a prediction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRow {
    pub item_name: String,
    pub avg_sale: f64,
    pub safety_stock: i64,
    pub reorder_point: i64,
    pub current_stock: i64,
    pub recommendation: Recommendation,
}

/// Count of rows per recommendation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub total: usize,
    pub critical: usize,
    pub reorder_soon: usize,
    pub safe: usize,
}

impl PredictionSummary {
    pub fn from_rows(rows: &[RecommendationRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            acc.total += 1;
            match row.recommendation {
                Recommendation::Critical => acc.critical += 1,
                Recommendation::ReorderSoon => acc.reorder_soon += 1,
                Recommendation::Safe => acc.safe += 1,
            }
            acc
        })
    }
}
