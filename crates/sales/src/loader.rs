//! CSV sales-history loader.
//!
//! Expected layout: a header row, then one row per period. The first column is
//! a period label (month, date, ...) and is not data; every other column is one
//! item's sales quantities.
//!
//! A column survives only if *every* cell coerces to a finite number; a row
//! that is shorter than the header counts as a failed cell for the columns it
//! is missing. Anything structurally wrong with the input (a row longer than
//! the header, invalid UTF-8, no header) yields an empty table instead of an
//! error.
//!
//! Cells are trimmed before coercion. Header names are kept verbatim.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use restock_core::DomainError;
use thiserror::Error;

use crate::table::{ItemSeries, SalesTable};

#[derive(Debug, Error)]
enum LoadError {
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing header row")]
    MissingHeader,

    #[error("row {line} has {found} fields, header has {expected}")]
    LongRow {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error(transparent)]
    Shape(#[from] DomainError),
}

/// Load a sales table from a CSV reader.
///
/// Malformed input is logged and returned as [`SalesTable::empty`].
pub fn load_sales_table<R: Read>(reader: R) -> SalesTable {
    match try_load(reader) {
        Ok(table) => {
            tracing::debug!(
                items = table.series().len(),
                periods = table.period_count(),
                "loaded sales table"
            );
            table
        }
        Err(e) => {
            tracing::warn!(error = %e, "unusable sales table; treating as empty");
            SalesTable::empty()
        }
    }
}

/// Load a sales table from CSV text.
pub fn load_sales_table_str(text: &str) -> SalesTable {
    load_sales_table(text.as_bytes())
}

/// Load a sales table from a CSV file path.
///
/// An unreadable file is treated like malformed input.
pub fn load_sales_table_file(path: impl AsRef<Path>) -> SalesTable {
    let path = path.as_ref();
    match std::fs::File::open(path) {
        Ok(file) => load_sales_table(file),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to open sales table");
            SalesTable::empty()
        }
    }
}

fn try_load<R: Read>(reader: R) -> Result<SalesTable, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    let names = item_names(headers.iter().skip(1));

    let mut periods: Vec<String> = Vec::new();
    // `None` once a column has seen a non-numeric cell.
    let mut columns: Vec<Option<Vec<f64>>> = vec![Some(Vec::new()); names.len()];

    for record in csv_reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(LoadError::LongRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                found: record.len(),
                expected: headers.len(),
            });
        }
        periods.push(record.get(0).unwrap_or_default().to_string());

        for (idx, slot) in columns.iter_mut().enumerate() {
            // Short rows leave trailing columns without a cell.
            let cell = record.get(idx + 1);
            let numeric = match slot {
                Some(values) => match cell.and_then(coerce_cell) {
                    Some(v) => {
                        values.push(v);
                        true
                    }
                    None => false,
                },
                None => continue,
            };
            if !numeric {
                *slot = None;
            }
        }
    }

    let series = names
        .into_iter()
        .zip(columns)
        .filter_map(|(name, column)| match column {
            Some(values) if !values.is_empty() => Some(ItemSeries::new(name, values)),
            _ => {
                tracing::debug!(item = %name, "dropping column without fully numeric data");
                None
            }
        })
        .collect::<Vec<_>>();

    if series.is_empty() {
        return Ok(SalesTable::empty());
    }

    Ok(SalesTable::new(periods, series)?)
}

/// A cell is numeric when it parses as a finite float.
fn coerce_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Item names for the data columns: blank headers become `Unnamed: <index>`
/// and repeated headers get `.1`, `.2`, ... suffixes in order of appearance.
fn item_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    headers
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                // +1: the label column is index 0 of the source table.
                format!("Unnamed: {}", idx + 1)
            } else {
                header.to_string()
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}
