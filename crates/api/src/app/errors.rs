use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::app::services::UploadError;

pub fn upload_error_to_response(err: UploadError) -> axum::response::Response {
    match &err {
        UploadError::UnsupportedFile(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "unsupported_file", err.to_string())
        }
        UploadError::NoUsableData => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "no_usable_data", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
