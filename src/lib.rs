//! Action gateway: validates generic CRUD actions and forwards them to a PostgREST-style backend.

pub mod action;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ident;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use action::Action;
pub use config::{default_rules, load_rules, resolve, ResolvedRules, RulesConfig, Settings};
pub use error::{AppError, ConfigError};
pub use query::{build, OutboundRequest, Payload};
pub use response::{normalize, ResponseEnvelope};
pub use routes::{action_routes, common_routes};
pub use service::{Backend, PostgrestClient, RawResponse, RequestValidator};
pub use state::AppState;
