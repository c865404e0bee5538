//! Request handlers for the form endpoints.
//!
//! Rate limiting has already run by the time a handler sees a request;
//! handlers apply the validation pipeline and hand cleaned data to the
//! directory collaborator.

use std::time::Instant;

use axum::{
    extract::{Form, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::http::request::X_REQUEST_ID;
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::logger::Context;
use crate::observability::metrics;
use crate::validation::form::{
    validate_form_data, FormPayload, LoginSchema, SignupSchema,
};

const SIGNUP_ROUTE: &str = "/api/signup";
const LOGIN_ROUTE: &str = "/api/login";

fn context(value: Value) -> Option<Context> {
    value.as_object().cloned()
}

fn header_request_id(headers: &HeaderMap) -> Value {
    headers
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(Value::from)
        .unwrap_or(Value::Null)
}

pub async fn health_handler() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

pub async fn signup_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(payload): Form<FormPayload>,
) -> Response {
    let start = Instant::now();
    let request_id = header_request_id(&headers);

    let data = match validate_form_data::<SignupSchema>(&payload) {
        Ok(data) => data,
        Err(errors) => {
            state.logger.warn(
                "Signup validation failed",
                context(json!({
                    "requestId": request_id,
                    "fields": errors.fields().collect::<Vec<_>>(),
                })),
            );
            metrics::record_validation_failure(SIGNUP_ROUTE, errors.len());
            metrics::record_request(SIGNUP_ROUTE, 422, start);
            return response::validation_failed(errors);
        }
    };

    if let Some(directory) = &state.directory {
        state.logger.service_call(
            "directory",
            "create_member",
            context(json!({ "requestId": request_id })),
        );
        let call_start = Instant::now();
        match directory.create_member(&data).await {
            Ok(()) => {
                state.logger.performance(
                    "directory.create_member",
                    call_start.elapsed().as_millis() as u64,
                    None,
                );
            }
            Err(e) => {
                state.logger.service_error(
                    "directory",
                    "create_member",
                    &e,
                    context(json!({ "requestId": request_id })),
                );
                metrics::record_request(SIGNUP_ROUTE, 502, start);
                return response::directory_unavailable();
            }
        }
    }

    state.logger.info(
        "Signup accepted",
        context(json!({
            "requestId": request_id,
            "email": data.email,
            "experienceLevel": data.experience_level,
        })),
    );
    metrics::record_request(SIGNUP_ROUTE, 200, start);
    response::ok()
}

pub async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(payload): Form<FormPayload>,
) -> Response {
    let start = Instant::now();
    let request_id = header_request_id(&headers);

    match validate_form_data::<LoginSchema>(&payload) {
        Ok(data) => {
            state.logger.info(
                "Login form accepted",
                context(json!({
                    "requestId": request_id,
                    "email": data.email,
                    "remember": data.remember,
                })),
            );
            metrics::record_request(LOGIN_ROUTE, 200, start);
            let mut body = json!({ "status": "ok" });
            if let Some(remember) = data.remember {
                body["remember"] = Value::from(remember);
            }
            (axum::http::StatusCode::OK, Json(body)).into_response()
        }
        Err(errors) => {
            state.logger.warn(
                "Login validation failed",
                context(json!({
                    "requestId": request_id,
                    "fields": errors.fields().collect::<Vec<_>>(),
                })),
            );
            metrics::record_validation_failure(LOGIN_ROUTE, errors.len());
            metrics::record_request(LOGIN_ROUTE, 422, start);
            response::validation_failed(errors)
        }
    }
}
