use chrono::{DateTime, Utc};
use serde::Serialize;

use restock_advisor::{PredictionSummary, RecommendationRow};
use restock_core::SessionId;
use restock_inventory::Factors;

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct FactorsDto {
    pub safety_factor: f64,
    pub reorder_factor: f64,
}

impl From<Factors> for FactorsDto {
    fn from(f: Factors) -> Self {
        Self {
            safety_factor: f.safety(),
            reorder_factor: f.reorder(),
        }
    }
}

/// What the session is currently working with.
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub session_id: SessionId,
    /// Item names of the current table; also the stock field names for `/predict`.
    pub items: Vec<String>,
    pub periods: usize,
    pub is_custom_data: bool,
    pub file_name: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub default_factors: FactorsDto,
    pub has_result: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRowDto {
    #[serde(flatten)]
    pub row: RecommendationRow,
    pub recommendation_label: &'static str,
}

impl From<RecommendationRow> for RecommendationRowDto {
    fn from(row: RecommendationRow) -> Self {
        let recommendation_label = row.recommendation.label();
        Self {
            row,
            recommendation_label,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub factors: FactorsDto,
    pub is_custom_data: bool,
    pub summary: PredictionSummary,
    pub rows: Vec<RecommendationRowDto>,
}

impl PredictResponse {
    pub fn new(factors: Factors, is_custom_data: bool, rows: Vec<RecommendationRow>) -> Self {
        Self {
            factors: factors.into(),
            is_custom_data,
            summary: PredictionSummary::from_rows(&rows),
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }
}
