//! Built-in sample history, used until a session uploads its own table.

use crate::table::{ItemSeries, SalesTable};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const SAMPLE: [(&str, [f64; 12]); 3] = [
    (
        "Kain_A_Batik_Sutera",
        [50.0, 55.0, 60.0, 48.0, 52.0, 65.0, 70.0, 68.0, 72.0, 58.0, 62.0, 75.0],
    ),
    (
        "Kain_B_Katun_Polos",
        [120.0, 130.0, 115.0, 125.0, 140.0, 110.0, 135.0, 122.0, 145.0, 118.0, 133.0, 150.0],
    ),
    (
        "Kain_C_Sutra_Murni",
        [80.0, 85.0, 78.0, 90.0, 95.0, 88.0, 92.0, 85.0, 89.0, 91.0, 87.0, 93.0],
    ),
];

/// Twelve months of sales for three fabric lines.
pub fn fallback_sales_table() -> SalesTable {
    let periods = MONTHS.iter().map(|m| m.to_string()).collect();
    let series = SAMPLE
        .iter()
        .map(|(name, values)| ItemSeries::new(*name, values.to_vec()))
        .collect();

    SalesTable::from_validated(periods, series)
}
