//! `restock-advisor`
//!
//! **Responsibility:** turn a sales history, current stock and two factors into
//! one reorder recommendation per item.
//!
//! This crate is pure computation:
//! - It takes every input as an argument and returns a fresh result.
//! - It does not hold state; callers keep the last result if they need it
//!   (e.g. for export).

pub mod advisor;
pub mod recommendation;

pub use advisor::{compute, round_quantity};
pub use recommendation::{PredictionSummary, Recommendation, RecommendationRow};
