//! Application services: the operations behind each route.
//!
//! Handlers stay thin; everything here takes the session id explicitly and
//! reads/writes that session's state only.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;

use restock_advisor::{RecommendationRow, compute};
use restock_core::SessionId;
use restock_export::ExportError;
use restock_inventory::{Factors, StockLevels};
use restock_sales::{SalesTable, fallback_sales_table};

use crate::app::dto::{IndexResponse, PredictResponse};
use crate::app::session::{SessionStore, UploadedTable};
use crate::config::ApiConfig;

pub const SAFETY_FACTOR_FIELD: &str = "safety_factor";
pub const REORDER_FACTOR_FIELD: &str = "reorder_factor";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("only .csv files are accepted (got '{0}')")]
    UnsupportedFile(String),

    #[error("the file contains no fully numeric item columns")]
    NoUsableData,
}

#[derive(Debug)]
pub struct AppServices {
    default_factors: Factors,
    fallback: SalesTable,
    sessions: SessionStore,
}

impl AppServices {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            default_factors: config.default_factors,
            fallback: fallback_sales_table(),
            sessions: SessionStore::with_policy(config.session_policy),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn default_factors(&self) -> Factors {
        self.default_factors
    }

    /// The session's uploaded table, or the fallback data when there is none.
    pub fn current_table(&self, session_id: SessionId) -> (SalesTable, bool) {
        match self.sessions.upload(session_id) {
            Some(upload) => (upload.table, true),
            None => (self.fallback.clone(), false),
        }
    }

    pub fn index_view(&self, session_id: SessionId) -> IndexResponse {
        let state = self.sessions.get(session_id);
        let (table, upload) = match state.upload {
            Some(u) => (u.table.clone(), Some(u)),
            None => (self.fallback.clone(), None),
        };

        IndexResponse {
            session_id,
            items: table.item_names(),
            periods: table.period_count(),
            is_custom_data: upload.is_some(),
            file_name: upload.as_ref().map(|u| u.file_name.clone()),
            uploaded_at: upload.as_ref().map(|u| u.uploaded_at),
            default_factors: self.default_factors.into(),
            has_result: state.last_result.is_some(),
        }
    }

    /// Validate and load an uploaded file, replacing the session's table.
    ///
    /// On error the session is left untouched.
    pub fn upload_csv(
        &self,
        session_id: SessionId,
        file_name: &str,
        contents: &[u8],
    ) -> Result<IndexResponse, UploadError> {
        if !is_csv_file_name(file_name) {
            return Err(UploadError::UnsupportedFile(file_name.to_string()));
        }

        let table = restock_sales::load_sales_table(contents);
        if table.is_empty() {
            return Err(UploadError::NoUsableData);
        }

        tracing::info!(
            session_id = %session_id,
            file_name,
            items = table.series().len(),
            periods = table.period_count(),
            "sales table uploaded"
        );

        self.sessions.replace_table(
            session_id,
            UploadedTable {
                table,
                file_name: file_name.to_string(),
                uploaded_at: Utc::now(),
            },
        );

        Ok(self.index_view(session_id))
    }

    /// Run a prediction from raw form fields.
    ///
    /// Factor fields fall back to the configured defaults and stock fields to
    /// zero; this never fails. Non-empty results become the session's last
    /// result.
    pub fn predict(&self, session_id: SessionId, fields: &HashMap<String, String>) -> PredictResponse {
        let (table, is_custom_data) = self.current_table(session_id);

        let factors = Factors::from_fields(
            fields.get(SAFETY_FACTOR_FIELD).map(String::as_str),
            fields.get(REORDER_FACTOR_FIELD).map(String::as_str),
            self.default_factors,
        );
        let stock = StockLevels::from_fields(table.item_names(), fields);

        let rows = compute(&stock, factors.safety(), factors.reorder(), &table);

        if !rows.is_empty() {
            self.sessions.store_result(session_id, rows.clone());
        }

        tracing::info!(
            session_id = %session_id,
            items = rows.len(),
            safety_factor = factors.safety(),
            reorder_factor = factors.reorder(),
            is_custom_data,
            "stock prediction computed"
        );

        PredictResponse::new(factors, is_custom_data, rows)
    }

    pub fn last_result(&self, session_id: SessionId) -> Option<Vec<RecommendationRow>> {
        self.sessions.last_result(session_id)
    }

    /// Spreadsheet of the session's last result; `None` when there is nothing to export.
    pub fn export_last(&self, session_id: SessionId) -> Option<Result<Vec<u8>, ExportError>> {
        let rows = self.last_result(session_id)?;
        Some(restock_export::export_recommendations(&rows))
    }
}

/// `.csv` extension, case-insensitive.
pub fn is_csv_file_name(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
}
