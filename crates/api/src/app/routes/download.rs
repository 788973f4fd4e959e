use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{StatusCode, header},
    response::{IntoResponse, Redirect},
};

use restock_export::{DOWNLOAD_FILE_NAME, XLSX_CONTENT_TYPE};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

/// Last prediction as an xlsx attachment; back to the index when there is none.
pub async fn download(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let Some(exported) = services.export_last(session.session_id()) else {
        return Redirect::to("/").into_response();
    };

    match exported {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(session_id = %session.session_id(), error = %e, "export failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "export_failed", e.to_string())
        }
    }
}
