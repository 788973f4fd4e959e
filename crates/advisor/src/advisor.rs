use restock_inventory::StockLevels;
use restock_sales::SalesTable;

use crate::recommendation::{Recommendation, RecommendationRow};

/// Mean-based reorder recommendation for every item column in `sales`.
///
/// Model, per item:
/// - `avg_sale` is the arithmetic mean over all periods.
/// - `safety_stock = round(avg_sale * safety_factor)`.
/// - `reorder_point = round(avg_sale * reorder_factor)`.
/// - The label comes from [`Recommendation::classify`] with the current stock
///   (0 for items missing from `stock_levels`).
///
/// Rows follow the column order of `sales`. Stock entries for items that are
/// not columns of `sales` are ignored. An empty table gives an empty result.
pub fn compute(
    stock_levels: &StockLevels,
    safety_factor: f64,
    reorder_factor: f64,
    sales: &SalesTable,
) -> Vec<RecommendationRow> {
    sales
        .series()
        .iter()
        .map(|series| {
            let avg_sale = mean(series.values());
            let safety_stock = round_quantity(avg_sale * safety_factor);
            let reorder_point = round_quantity(avg_sale * reorder_factor);
            let current_stock = stock_levels.get(series.name());

            RecommendationRow {
                item_name: series.name().to_string(),
                avg_sale,
                safety_stock,
                reorder_point,
                current_stock,
                recommendation: Recommendation::classify(
                    current_stock,
                    safety_stock,
                    reorder_point,
                ),
            }
        })
        .collect()
}

/// Round half to even, then truncate to a whole quantity.
///
/// `92.5 -> 92`, `93.5 -> 94`, `30.83 -> 31`. Out-of-range values saturate.
pub fn round_quantity(x: f64) -> i64 {
    x.round_ties_even() as i64
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}
