use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Multipart},
    http::StatusCode,
    response::IntoResponse,
};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

/// Multipart field holding the CSV file.
const FILE_FIELD: &str = "file";

pub async fn upload(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    mut multipart: Multipart,
) -> axum::response::Response {
    let mut file = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return errors::json_error(e.status(), "invalid_multipart", e.body_text()),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => {
                file = Some((file_name, bytes));
                break;
            }
            Err(e) => return errors::json_error(e.status(), "invalid_multipart", e.body_text()),
        }
    }

    let Some((file_name, bytes)) = file else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "missing_file",
            "multipart field 'file' is required",
        );
    };

    match services.upload_csv(session.session_id(), &file_name, &bytes) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => {
            tracing::warn!(
                session_id = %session.session_id(),
                file_name = %file_name,
                error = %e,
                "upload rejected"
            );
            errors::upload_error_to_response(e)
        }
    }
}
