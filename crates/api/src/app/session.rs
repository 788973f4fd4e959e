//! Session-scoped state: the uploaded sales table and the last prediction.
//!
//! Each client session owns its own state; nothing is shared between sessions.
//! Concurrent requests from the *same* session are last-writer-wins.
//!
//! The store is bounded: a session not written to (upload or predict) for
//! `idle_ttl` is dropped, and at `max_sessions` the least recently written
//! session is evicted to make room for a new one.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use restock_advisor::RecommendationRow;
use restock_core::SessionId;
use restock_sales::SalesTable;

pub const DEFAULT_MAX_SESSIONS: usize = 10_000;
pub const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// A table the session uploaded, replacing the fallback data.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedTable {
    pub table: SalesTable,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub upload: Option<UploadedTable>,
    /// Most recent non-empty prediction, kept for export.
    pub last_result: Option<Vec<RecommendationRow>>,
}

/// Retention limits for [`SessionStore`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionPolicy {
    pub max_sessions: usize,
    pub idle_ttl: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_ttl: DEFAULT_SESSION_IDLE_TTL,
        }
    }
}

#[derive(Debug)]
struct Entry {
    state: SessionState,
    touched: Instant,
}

/// In-memory, session-isolated store.
#[derive(Debug, Default)]
pub struct SessionStore {
    policy: SessionPolicy,
    inner: RwLock<HashMap<SessionId, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SessionPolicy) -> Self {
        Self {
            policy: SessionPolicy {
                max_sessions: policy.max_sessions.max(1),
                ..policy
            },
            inner: RwLock::default(),
        }
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Snapshot of a session's state (default state for unknown or expired sessions).
    pub fn get(&self, session_id: SessionId) -> SessionState {
        self.read_live(session_id, Instant::now(), |state| state.clone())
            .unwrap_or_default()
    }

    pub fn upload(&self, session_id: SessionId) -> Option<UploadedTable> {
        self.read_live(session_id, Instant::now(), |state| state.upload.clone())
            .flatten()
    }

    /// Replace the session's table wholesale.
    pub fn replace_table(&self, session_id: SessionId, upload: UploadedTable) {
        self.write_at(session_id, Instant::now(), |state| state.upload = Some(upload));
    }

    pub fn store_result(&self, session_id: SessionId, rows: Vec<RecommendationRow>) {
        self.write_at(session_id, Instant::now(), |state| state.last_result = Some(rows));
    }

    pub fn last_result(&self, session_id: SessionId) -> Option<Vec<RecommendationRow>> {
        self.read_live(session_id, Instant::now(), |state| state.last_result.clone())
            .flatten()
    }

    /// Number of sessions holding state.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.touched) > self.policy.idle_ttl
    }

    fn read_live<T>(
        &self,
        session_id: SessionId,
        now: Instant,
        f: impl FnOnce(&SessionState) -> T,
    ) -> Option<T> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&session_id)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| f(&entry.state))
    }

    fn write_at(&self, session_id: SessionId, now: Instant, f: impl FnOnce(&mut SessionState)) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let before = map.len();
        map.retain(|_, entry| !self.is_expired(entry, now));

        if !map.contains_key(&session_id) && map.len() >= self.policy.max_sessions {
            let oldest = map
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                map.remove(&oldest);
            }
        }

        let evicted = before - map.len();
        if evicted > 0 {
            tracing::debug!(evicted, sessions = map.len(), "evicted idle sessions");
        }

        let entry = map.entry(session_id).or_insert_with(|| Entry {
            state: SessionState::default(),
            touched: now,
        });
        entry.touched = now;
        f(&mut entry.state);
    }
}
