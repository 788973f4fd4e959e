//! Spreadsheet export of the most recent recommendation set.

pub mod xlsx;

pub use xlsx::{
    COLUMNS, DOWNLOAD_FILE_NAME, ExportError, SHEET_NAME, XLSX_CONTENT_TYPE, export_recommendations,
};
