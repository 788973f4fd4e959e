//! Historical sales module.
//!
//! Turns raw delimited text into a [`SalesTable`] of fully-numeric per-item
//! series. Loading never fails: unusable input becomes an empty table, which
//! callers treat as "no usable data".

pub mod fallback;
pub mod loader;
pub mod table;

pub use fallback::fallback_sales_table;
pub use loader::{load_sales_table, load_sales_table_file, load_sales_table_str};
pub use table::{ItemSeries, SalesTable};
