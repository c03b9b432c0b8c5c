//! Action route: POST /action translates a CRUD intent into a backend call.

use crate::handlers::post_action;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn action_routes(state: AppState) -> Router {
    Router::new()
        .route("/action", post(post_action))
        .with_state(state)
}
