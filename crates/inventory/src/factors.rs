use serde::{Deserialize, Serialize};

use restock_core::{DomainError, DomainResult, ValueObject};

pub const DEFAULT_SAFETY_FACTOR: f64 = 0.5;
pub const DEFAULT_REORDER_FACTOR: f64 = 1.5;

/// Multipliers applied to the average sale to get safety stock and reorder point.
///
/// Both are finite and strictly positive.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    safety: f64,
    reorder: f64,
}

impl ValueObject for Factors {}

impl Default for Factors {
    fn default() -> Self {
        Self {
            safety: DEFAULT_SAFETY_FACTOR,
            reorder: DEFAULT_REORDER_FACTOR,
        }
    }
}

impl Factors {
    pub fn new(safety: f64, reorder: f64) -> DomainResult<Self> {
        ensure_factor("safety_factor", safety)?;
        ensure_factor("reorder_factor", reorder)?;
        Ok(Self { safety, reorder })
    }

    /// Factors from raw request fields; each one falls back to `defaults`
    /// independently when missing or invalid.
    pub fn from_fields(safety: Option<&str>, reorder: Option<&str>, defaults: Factors) -> Self {
        Self {
            safety: parse_factor(safety, defaults.safety),
            reorder: parse_factor(reorder, defaults.reorder),
        }
    }

    pub fn safety(&self) -> f64 {
        self.safety
    }

    pub fn reorder(&self) -> f64 {
        self.reorder
    }
}

fn ensure_factor(name: &str, value: f64) -> DomainResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(DomainError::validation(format!(
            "{name} must be a finite positive number"
        )));
    }
    Ok(())
}

/// Parse a factor field, returning `default` for anything that is not a
/// finite positive number.
pub fn parse_factor(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}
