//! Route builders merged by the server binary.

mod action;
mod common;
pub use action::action_routes;
pub use common::common_routes;
