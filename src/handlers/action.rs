//! Action handler: parse the intent, validate, translate, execute, normalize.

use crate::action::Action;
use crate::config::ResolvedRules;
use crate::error::AppError;
use crate::ident::json_type_name;
use crate::query::{build, OutboundRequest, Payload};
use crate::response::{normalize, ResponseEnvelope};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{Map, Value};
use tracing::Instrument;

/// Inbound `{"table", "action", "payload"}` body.
#[derive(Clone, Debug)]
pub struct ActionRequest {
    pub table: String,
    pub action: String,
    pub payload: Payload,
}

impl ActionRequest {
    pub fn from_json(body: Value) -> Result<Self, AppError> {
        let mut obj = body_to_map(body)?;
        let table = take_string(&mut obj, "table")?;
        let action = take_string(&mut obj, "action")?;
        let payload = match obj.remove("payload") {
            None | Some(Value::Null) => return Err(AppError::MissingField("payload")),
            Some(Value::Object(m)) => m,
            Some(other) => {
                return Err(AppError::BadRequest(format!(
                    "payload must be a JSON object, got {}",
                    json_type_name(&other)
                )))
            }
        };
        Ok(ActionRequest { table, action, payload })
    }
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        other => Err(AppError::BadRequest(format!(
            "body must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn take_string(obj: &mut Map<String, Value>, field: &'static str) -> Result<String, AppError> {
    match obj.remove(field) {
        None | Some(Value::Null) => Err(AppError::MissingField(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(AppError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(AppError::BadRequest(format!(
            "{} must be a string, got {}",
            field,
            json_type_name(&other)
        ))),
    }
}

/// Validate and translate without touching the network.
pub fn prepare(rules: &ResolvedRules, base_url: &str, request: ActionRequest) -> Result<OutboundRequest, AppError> {
    let action: Action = request.action.parse()?;
    RequestValidator::validate(action, &request.payload, rules)?;
    build(base_url, &request.table, action, request.payload)
}

pub async fn run_action(state: &AppState, request: ActionRequest) -> Result<ResponseEnvelope, AppError> {
    let outbound = prepare(&state.rules, &state.backend_url, request).map_err(|e| {
        tracing::warn!(error = %e, "action rejected");
        e
    })?;
    let raw = state.backend.execute(&outbound).await.map_err(|e| {
        tracing::warn!(error = %e, method = %outbound.method, "backend call failed");
        e
    })?;
    let envelope = normalize(raw.status, &raw.body);
    tracing::info!(method = %outbound.method, status = envelope.status_code, "action completed");
    Ok(envelope)
}

/// POST /action
pub async fn post_action(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ResponseEnvelope, AppError> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = ActionRequest::from_json(body).map_err(|e| {
        tracing::warn!(error = %e, "malformed action request");
        e
    })?;
    let span = tracing::info_span!(
        "action",
        request_id = %uuid::Uuid::new_v4(),
        table = %request.table,
        action = %request.action
    );
    run_action(&state, request).instrument(span).await
}
