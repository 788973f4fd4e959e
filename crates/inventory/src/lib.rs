//! Inventory inputs for a prediction request.
//!
//! Current stock levels and the tunable factors, plus the lenient parsing the
//! request layer uses for them (bad text falls back, it never fails).

pub mod factors;
pub mod stock;

pub use factors::{DEFAULT_REORDER_FACTOR, DEFAULT_SAFETY_FACTOR, Factors, parse_factor};
pub use stock::{StockLevels, parse_stock};
