use axum::{
    Router,
    routing::{get, post},
};

pub mod download;
pub mod index;
pub mod predict;
pub mod system;
pub mod upload;

/// Router for all session-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/upload", post(upload::upload))
        .route("/predict", post(predict::predict))
        .route("/download", get(download::download))
}
