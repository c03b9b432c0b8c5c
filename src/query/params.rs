//! Render serde_json::Value payload entries as PostgREST query parameters.

use crate::error::AppError;
use crate::ident::json_type_name;
use serde_json::Value;
use std::fmt;

/// A payload value that can appear on the right side of a PostgREST filter.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl FilterValue {
    pub fn from_json(key: &str, v: &Value) -> Result<Self, AppError> {
        Ok(match v {
            Value::Null => FilterValue::Null,
            Value::Bool(b) => FilterValue::Bool(*b),
            Value::Number(n) => FilterValue::Number(n.clone()),
            Value::String(s) => FilterValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => {
                return Err(AppError::Validation(format!(
                    "value for '{}' must be a string, number or boolean, got {}; e.g. \"{}\": \"active\"",
                    key,
                    json_type_name(v),
                    key
                )))
            }
        })
    }

    /// Operator and operand, e.g. `eq.open%20now` or `is.null`.
    pub fn operand(&self) -> String {
        match self {
            FilterValue::Null => "is.null".to_string(),
            FilterValue::Bool(b) => format!("eq.{}", b),
            FilterValue::Number(n) => format!("eq.{}", n),
            FilterValue::String(s) => format!("eq.{}", urlencoding::encode(s)),
        }
    }
}

/// One `key=<op>.<value>` query term.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: FilterValue,
}

impl Filter {
    pub fn eq(column: &str, v: &Value) -> Result<Self, AppError> {
        Ok(Filter {
            column: column.to_string(),
            value: FilterValue::from_json(column, v)?,
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.value.operand())
    }
}

/// Ordered query parameters; renders without the leading `?`.
#[derive(Clone, Debug, Default)]
pub struct QueryParams {
    terms: Vec<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams { terms: Vec::new() }
    }

    pub fn push_filter(&mut self, filter: &Filter) {
        self.terms.push(filter.to_string());
    }

    pub fn push(&mut self, key: &str, value: impl fmt::Display) {
        self.terms.push(format!("{}={}", key, value));
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn render(&self) -> String {
        self.terms.join("&")
    }
}
