//! Response envelopes.
//!
//! Only the field-keyed error map and the throttle hint are ever exposed
//! to clients; stack traces, internal keys, and raw context stay in the
//! logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::validation::form::FieldErrors;

/// 200 with a bare ok status.
pub fn ok() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

/// 422 carrying the field-keyed error map.
pub fn validation_failed(errors: FieldErrors) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "error": "validation_failed",
            "errors": errors,
        })),
    )
        .into_response()
}

/// 502 when the member directory rejected or never answered.
pub fn directory_unavailable() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": "directory_unavailable" })),
    )
        .into_response()
}
