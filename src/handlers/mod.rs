//! HTTP handlers for the action endpoint.

pub mod action;
pub use action::*;
