//! Service configuration, read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `RESTOCK_BIND_ADDR` | `0.0.0.0:8080` |
//! | `RESTOCK_SAFETY_FACTOR` | `0.5` |
//! | `RESTOCK_REORDER_FACTOR` | `1.5` |
//! | `RESTOCK_MAX_UPLOAD_BYTES` | `10485760` |
//! | `RESTOCK_MAX_SESSIONS` | `10000` |
//! | `RESTOCK_SESSION_IDLE_SECS` | `3600` |
//!
//! Invalid values are logged and replaced by the default.

use std::net::SocketAddr;
use std::time::Duration;

use restock_inventory::{DEFAULT_REORDER_FACTOR, DEFAULT_SAFETY_FACTOR, Factors};

use crate::app::session::SessionPolicy;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Factors used when a prediction request omits or garbles them.
    pub default_factors: Factors,
    pub max_upload_bytes: usize,
    pub session_policy: SessionPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            default_factors: Factors::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_policy: SessionPolicy::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = parse_or_default(&lookup, "RESTOCK_BIND_ADDR", defaults.bind_addr);
        let safety = parse_or_default(&lookup, "RESTOCK_SAFETY_FACTOR", DEFAULT_SAFETY_FACTOR);
        let reorder = parse_or_default(&lookup, "RESTOCK_REORDER_FACTOR", DEFAULT_REORDER_FACTOR);
        let max_upload_bytes =
            parse_or_default(&lookup, "RESTOCK_MAX_UPLOAD_BYTES", defaults.max_upload_bytes);
        let max_sessions = parse_or_default(
            &lookup,
            "RESTOCK_MAX_SESSIONS",
            defaults.session_policy.max_sessions,
        );
        let idle_secs = parse_or_default(
            &lookup,
            "RESTOCK_SESSION_IDLE_SECS",
            defaults.session_policy.idle_ttl.as_secs(),
        );

        let default_factors = Factors::new(safety, reorder).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid default factors; using built-in defaults");
            Factors::default()
        });

        Self {
            bind_addr,
            default_factors,
            max_upload_bytes,
            session_policy: SessionPolicy {
                max_sessions,
                idle_ttl: Duration::from_secs(idle_secs),
            },
        }
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, ?default, "invalid config value; using default");
            default
        }),
    }
}
