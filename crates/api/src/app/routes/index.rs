use std::sync::Arc;

use axum::{Json, extract::Extension};

use crate::app::dto::IndexResponse;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Json<IndexResponse> {
    Json(services.index_view(session.session_id()))
}
