use std::collections::HashMap;
use std::sync::Arc;

use axum::{Form, Json, extract::Extension};

use crate::app::dto::PredictResponse;
use crate::app::services::AppServices;
use crate::context::SessionContext;

/// Form fields: `safety_factor`, `reorder_factor`, and one stock field per
/// item name. Unparseable values fall back instead of failing the request;
/// a missing or non-form body counts as no fields at all.
pub async fn predict(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    form: Option<Form<HashMap<String, String>>>,
) -> Json<PredictResponse> {
    let fields = form.map(|Form(fields)| fields).unwrap_or_default();
    Json(services.predict(session.session_id(), &fields))
}
