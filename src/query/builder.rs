//! Builds PostgREST calls (method, URL, body) for create, read, update, delete.

use crate::action::Action;
use crate::error::AppError;
use crate::ident::is_identifier;
use crate::query::params::{Filter, QueryParams};
use crate::service::MAX_LIMIT;
use axum::http::Method;
use serde_json::{Map, Value};

pub type Payload = Map<String, Value>;

/// Applied to reads that do not send `limit`.
pub const DEFAULT_LIMIT: i64 = 50;

/// A fully described backend call. Executed by a `Backend`, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Payload>,
}

/// `<base>/<table>`; table must be an identifier so it never needs encoding.
fn table_url(base_url: &str, table: &str) -> Result<String, AppError> {
    if !is_identifier(table) {
        return Err(AppError::Validation(format!(
            "table '{}' is not a valid table name; use letters, digits and underscores, starting with a letter or underscore, e.g. \"widgets\"",
            table
        )));
    }
    Ok(format!("{}/{}", base_url.trim_end_matches('/'), table))
}

fn with_query(url: String, params: &QueryParams) -> String {
    if params.is_empty() {
        url
    } else {
        format!("{}?{}", url, params.render())
    }
}

/// `id=eq.<id>` for update and delete. Null, empty string and absent all count as missing.
fn id_filter(action: Action, id: Option<&Value>) -> Result<Filter, AppError> {
    match id {
        None | Some(Value::Null) => Err(missing_id(action)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(missing_id(action)),
        Some(v) => Filter::eq("id", v),
    }
}

fn missing_id(action: Action) -> AppError {
    AppError::Validation(format!(
        "missing id for {}; include the id of the row to {}, e.g. \"id\": 42",
        action, action
    ))
}

/// Dispatch on the action. Validation has already run on `payload`.
pub fn build(base_url: &str, table: &str, action: Action, payload: Payload) -> Result<OutboundRequest, AppError> {
    match action {
        Action::Create => create(base_url, table, payload),
        Action::Read => read(base_url, table, payload),
        Action::Update => update(base_url, table, payload),
        Action::Delete => delete(base_url, table, &payload),
    }
}

/// POST with the payload (minus `component`) as body.
pub fn create(base_url: &str, table: &str, mut payload: Payload) -> Result<OutboundRequest, AppError> {
    let url = table_url(base_url, table)?;
    payload.remove("component");
    Ok(OutboundRequest {
        method: Method::POST,
        url,
        body: Some(payload),
    })
}

/// GET with `key=eq.value` per remaining field, then `order` and `limit` (default 50).
pub fn read(base_url: &str, table: &str, mut payload: Payload) -> Result<OutboundRequest, AppError> {
    let url = table_url(base_url, table)?;
    payload.remove("component");
    let sort = payload.remove("sort");
    let limit = payload.remove("limit");

    let mut params = QueryParams::new();
    for (column, value) in &payload {
        params.push_filter(&Filter::eq(column, value)?);
    }
    if let Some(sort) = sort {
        let order = sort
            .as_str()
            .ok_or_else(|| AppError::Validation(format!("sort must be a string, got {}", sort)))?;
        params.push("order", order);
    }
    let limit = match limit {
        Some(v) => v
            .as_i64()
            .filter(|n| (1..=MAX_LIMIT).contains(n))
            .ok_or_else(|| AppError::Validation(format!("limit must be an integer between 1 and {}, got {}", MAX_LIMIT, v)))?,
        None => DEFAULT_LIMIT,
    };
    params.push("limit", limit);

    Ok(OutboundRequest {
        method: Method::GET,
        url: with_query(url, &params),
        body: None,
    })
}

/// PATCH addressed by id; the id is removed from the body.
pub fn update(base_url: &str, table: &str, mut payload: Payload) -> Result<OutboundRequest, AppError> {
    let url = table_url(base_url, table)?;
    let id = payload.remove("id");
    let filter = id_filter(Action::Update, id.as_ref())?;
    payload.remove("component");
    let mut params = QueryParams::new();
    params.push_filter(&filter);
    Ok(OutboundRequest {
        method: Method::PATCH,
        url: with_query(url, &params),
        body: Some(payload),
    })
}

/// DELETE addressed by id; no body.
pub fn delete(base_url: &str, table: &str, payload: &Payload) -> Result<OutboundRequest, AppError> {
    let url = table_url(base_url, table)?;
    let filter = id_filter(Action::Delete, payload.get("id"))?;
    let mut params = QueryParams::new();
    params.push_filter(&filter);
    Ok(OutboundRequest {
        method: Method::DELETE,
        url: with_query(url, &params),
        body: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://db.example.com/rest/v1";

    fn payload(v: Value) -> Payload {
        match v {
            Value::Object(m) => m,
            _ => panic!("payload must be an object"),
        }
    }

    fn query_terms(url: &str) -> Vec<String> {
        url.split_once('?')
            .map(|(_, q)| q.split('&').map(String::from).collect())
            .unwrap_or_default()
    }

    #[test]
    fn create_posts_payload_without_component() {
        let req = build(BASE, "widgets", Action::Create, payload(json!({"component": "X.Create", "status": "clean"}))).unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url, format!("{}/widgets", BASE));
        assert_eq!(req.body, Some(payload(json!({"status": "clean"}))));
    }

    #[test]
    fn read_with_sort_applies_default_limit() {
        let req = build(BASE, "widgets", Action::Read, payload(json!({"component": "X.Read", "sort": "name.asc"}))).unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url, format!("{}/widgets?order=name.asc&limit=50", BASE));
        assert_eq!(req.body, None);
    }

    #[test]
    fn read_filters_appear_once_and_reserved_keys_never() {
        let req = build(
            BASE,
            "widgets",
            Action::Read,
            payload(json!({"component": "X.Read", "status": "open", "owner": "ana", "sort": "name.desc", "limit": 10})),
        )
        .unwrap();
        let terms = query_terms(&req.url);
        assert_eq!(terms.iter().filter(|t| *t == "status=eq.open").count(), 1);
        assert_eq!(terms.iter().filter(|t| *t == "owner=eq.ana").count(), 1);
        assert!(terms.contains(&"order=name.desc".to_string()));
        assert!(terms.contains(&"limit=10".to_string()));
        assert!(!terms.iter().any(|t| t.starts_with("sort=") || t.starts_with("limit=eq") || t.starts_with("component=")));
        assert_eq!(terms.len(), 4);
    }

    #[test]
    fn read_encodes_filter_values() {
        let req = build(BASE, "widgets", Action::Read, payload(json!({"name": "a&limit=1000"}))).unwrap();
        assert_eq!(req.url, format!("{}/widgets?name=eq.a%26limit%3D1000&limit=50", BASE));
    }

    #[test]
    fn read_rejects_nested_filter_values() {
        let err = build(BASE, "widgets", Action::Read, payload(json!({"status": ["a", "b"]}))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn update_requires_id_and_strips_it_from_body() {
        let err = build(BASE, "widgets", Action::Update, payload(json!({"component": "X.Update"}))).unwrap_err();
        assert!(err.to_string().starts_with("missing id for update"), "{err}");

        let req = build(BASE, "widgets", Action::Update, payload(json!({"component": "X.Update", "id": 3, "status": "done"}))).unwrap();
        assert_eq!(req.method, Method::PATCH);
        assert_eq!(req.url, format!("{}/widgets?id=eq.3", BASE));
        assert_eq!(req.body, Some(payload(json!({"status": "done"}))));
    }

    #[test]
    fn empty_or_null_id_is_missing() {
        for id in [json!(""), json!("  "), json!(null)] {
            let err = build(BASE, "widgets", Action::Delete, payload(json!({"id": id}))).unwrap_err();
            assert!(err.to_string().starts_with("missing id for delete"), "{err}");
        }
    }

    #[test]
    fn delete_addresses_by_id_without_body() {
        let req = build(BASE, "widgets", Action::Delete, payload(json!({"id": 7}))).unwrap();
        assert_eq!(
            req,
            OutboundRequest {
                method: Method::DELETE,
                url: format!("{}/widgets?id=eq.7", BASE),
                body: None,
            }
        );
    }

    #[test]
    fn string_ids_are_encoded() {
        let req = build(BASE, "widgets", Action::Delete, payload(json!({"id": "a b"}))).unwrap();
        assert_eq!(req.url, format!("{}/widgets?id=eq.a%20b", BASE));
    }

    #[test]
    fn invalid_table_is_rejected() {
        for table in ["", "widgets?select=*", "../admin", "1st"] {
            assert!(build(BASE, table, Action::Read, Payload::new()).is_err(), "{table}");
        }
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let req = build("http://localhost:3000/", "widgets", Action::Create, Payload::new()).unwrap();
        assert_eq!(req.url, "http://localhost:3000/widgets");
    }

    #[test]
    fn build_is_deterministic() {
        let p = payload(json!({"status": "open", "owner": "ana", "limit": 5}));
        let a = build(BASE, "widgets", Action::Read, p.clone()).unwrap();
        let b = build(BASE, "widgets", Action::Read, p).unwrap();
        assert_eq!(a, b);
    }
}
