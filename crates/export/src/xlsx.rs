use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use restock_advisor::RecommendationRow;

pub const SHEET_NAME: &str = "Stock_Recommendations";
pub const DOWNLOAD_FILE_NAME: &str = "stock_prediction.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header row, in output column order.
pub const COLUMNS: [&str; 6] = [
    "item_name",
    "avg_sale",
    "safety_stock",
    "reorder_point",
    "current_stock",
    "recommendation",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("xlsx write failed: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("too many rows for one worksheet: {0}")]
    TooManyRows(usize),
}

/// Serialize `rows` as an in-memory xlsx workbook: one header row, then one
/// row per item.
pub fn export_recommendations(rows: &[RecommendationRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(COLUMNS) {
        worksheet.write_string_with_format(0, col, title, &header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = u32::try_from(idx + 1).map_err(|_| ExportError::TooManyRows(rows.len()))?;
        worksheet.write_string(r, 0, row.item_name.as_str())?;
        worksheet.write_number(r, 1, row.avg_sale)?;
        worksheet.write_number(r, 2, row.safety_stock as f64)?;
        worksheet.write_number(r, 3, row.reorder_point as f64)?;
        worksheet.write_number(r, 4, row.current_stock as f64)?;
        worksheet.write_string(r, 5, row.recommendation.label())?;
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(rows = rows.len(), bytes = bytes.len(), "exported recommendations");
    Ok(bytes)
}
