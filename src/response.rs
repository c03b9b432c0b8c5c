//! Response envelope: backend status plus parsed body, or a parse-failure descriptor.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

pub const UNPARSABLE_BODY_ERROR: &str = "backend did not return valid JSON";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub body: Value,
}

impl ResponseEnvelope {
    pub fn is_parse_failure(&self) -> bool {
        self.body.get("error").and_then(Value::as_str) == Some(UNPARSABLE_BODY_ERROR)
            && self.body.get("details").is_some()
    }
}

/// Wrap the backend's raw status and body. The status is kept even when the body is not JSON.
pub fn normalize(status: u16, body: &[u8]) -> ResponseEnvelope {
    match serde_json::from_slice::<Value>(body) {
        Ok(parsed) => ResponseEnvelope {
            status_code: status,
            body: parsed,
        },
        Err(e) => {
            tracing::warn!(status, error = %e, "backend returned a non-JSON body");
            ResponseEnvelope {
                status_code: status,
                body: serde_json::json!({
                    "error": UNPARSABLE_BODY_ERROR,
                    "statusCode": status,
                    "text": String::from_utf8_lossy(body),
                    "details": e.to_string(),
                }),
            }
        }
    }
}

/// The envelope's status becomes the HTTP status; its body is the HTTP body.
impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_passes_through() {
        let env = normalize(201, br#"[{"id": 1, "status": "clean"}]"#);
        assert_eq!(env.status_code, 201);
        assert_eq!(env.body, json!([{"id": 1, "status": "clean"}]));
        assert!(!env.is_parse_failure());
    }

    #[test]
    fn non_json_body_keeps_status_and_describes_failure() {
        let env = normalize(200, b"<html>oops</html>");
        assert_eq!(env.status_code, 200);
        assert_eq!(env.body["error"], UNPARSABLE_BODY_ERROR);
        assert_eq!(env.body["statusCode"], 200);
        assert_eq!(env.body["text"], "<html>oops</html>");
        assert!(env.body["details"].as_str().is_some_and(|d| !d.is_empty()));
        assert!(env.is_parse_failure());
    }

    #[test]
    fn error_status_is_preserved_on_parse_failure() {
        let env = normalize(503, b"Service Unavailable");
        assert_eq!(env.status_code, 503);
        assert_eq!(env.body["statusCode"], 503);
    }

    #[test]
    fn empty_body_is_a_parse_failure() {
        let env = normalize(204, b"");
        assert_eq!(env.status_code, 204);
        assert!(env.is_parse_failure());
        assert_eq!(env.body["text"], "");
    }

    #[test]
    fn invalid_utf8_is_rendered_lossily() {
        let env = normalize(500, &[0xff, b'a']);
        assert_eq!(env.body["text"], "\u{fffd}a");
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let env = normalize(200, b"{}");
        assert_eq!(serde_json::to_value(&env).unwrap(), json!({"statusCode": 200, "body": {}}));
    }

    #[test]
    fn into_response_uses_backend_status() {
        let res = normalize(404, b"[]").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = ResponseEnvelope { status_code: 42, body: json!(null) }.into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }
}
