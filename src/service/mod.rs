//! Action service: rule-table validation and backend execution.

mod backend;
mod validation;
pub use backend::{Backend, PostgrestClient, RawResponse};
pub use validation::{RequestValidator, MAX_LIMIT};
