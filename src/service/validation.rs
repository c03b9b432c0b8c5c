//! Request validation against the rule table.
//! Checks run in a fixed order and stop at the first failure: component, allowed fields, sort (read), limit (read).

use crate::action::Action;
use crate::config::{ActionRule, ResolvedRules};
use crate::error::AppError;
use crate::ident::{is_identifier, json_type_name};
use crate::query::Payload;
use serde_json::Value;

pub const MAX_LIMIT: i64 = 1000;

pub struct RequestValidator;

impl RequestValidator {
    pub fn validate(action: Action, payload: &Payload, rules: &ResolvedRules) -> Result<(), AppError> {
        let rule = rules.rule(action);
        check_component(payload, rule)?;
        check_allowed_fields(payload, rule)?;
        if action == Action::Read {
            if let Some(sort) = payload.get("sort") {
                check_sort(sort)?;
            }
            if let Some(limit) = payload.get("limit") {
                check_limit(limit)?;
            }
        }
        Ok(())
    }
}

fn check_component(payload: &Payload, rule: &ActionRule) -> Result<(), AppError> {
    let supplied = payload.get("component").ok_or_else(|| {
        let example = rule.component.as_deref().unwrap_or("<Component>.<Action>");
        AppError::Validation(format!(
            "payload is missing required field 'component' for action '{}'; add it, e.g. \"component\": \"{}\"",
            rule.action, example
        ))
    })?;
    let Some(expected) = rule.component.as_deref() else {
        return Ok(());
    };
    if supplied.as_str() != Some(expected) {
        let shown = match supplied {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(AppError::Validation(format!(
            "component '{}' does not match the expected component '{}' for action '{}'; send \"component\": \"{}\"",
            shown, expected, rule.action, expected
        )));
    }
    Ok(())
}

fn check_allowed_fields(payload: &Payload, rule: &ActionRule) -> Result<(), AppError> {
    let mut extra: Vec<&str> = payload
        .keys()
        .map(String::as_str)
        .filter(|k| !rule.allows(k))
        .collect();
    if extra.is_empty() {
        return Ok(());
    }
    extra.sort_unstable();
    let allowed: Vec<&str> = rule.allowed_fields.iter().map(String::as_str).collect();
    Err(AppError::Validation(format!(
        "fields not allowed for action '{}': {}; allowed fields are: {}",
        rule.action,
        extra.join(", "),
        allowed.join(", ")
    )))
}

fn check_sort(sort: &Value) -> Result<(), AppError> {
    let s = sort.as_str().ok_or_else(|| {
        AppError::Validation(format!(
            "sort must be a string of the form <column>.<asc|desc>, got {} {}; e.g. \"sort\": \"name.asc\"",
            json_type_name(sort),
            sort
        ))
    })?;
    let (column, direction) = s.rsplit_once('.').ok_or_else(|| {
        AppError::Validation(format!(
            "sort '{}' is missing the '.asc' or '.desc' suffix; expected <column>.<asc|desc>, e.g. \"{}.asc\"",
            s, s
        ))
    })?;
    if direction != "asc" && direction != "desc" {
        let detail = if direction.is_empty() {
            "is missing its direction".to_string()
        } else {
            format!("has invalid direction '{}'", direction)
        };
        return Err(AppError::Validation(format!(
            "sort '{}' {}; the suffix must be 'asc' or 'desc', e.g. \"{}.desc\"",
            s, detail, column
        )));
    }
    if !is_identifier(column) {
        return Err(AppError::Validation(format!(
            "sort column '{}' is not a valid identifier; use letters, digits and underscores, starting with a letter or underscore, e.g. \"created_at.{}\"",
            column, direction
        )));
    }
    Ok(())
}

fn check_limit(limit: &Value) -> Result<(), AppError> {
    match limit.as_i64() {
        Some(n) if (1..=MAX_LIMIT).contains(&n) => Ok(()),
        _ => Err(AppError::Validation(format!(
            "limit must be an integer between 1 and {}, got {} ({}); e.g. \"limit\": 25",
            MAX_LIMIT,
            limit,
            json_type_name(limit)
        ))),
    }
}
