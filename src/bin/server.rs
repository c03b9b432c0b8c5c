//! Gateway server: loads settings from env (and `.env`), loads the rule table, mounts common and action routes.

use action_gateway::{action_routes, common_routes, load_rules, AppState, PostgrestClient, Settings};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("action_gateway=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "settings loaded");
    let rules = load_rules(settings.rules_path.as_deref()).await?;
    let backend = PostgrestClient::from_settings(&settings)?;
    let state = AppState::new(rules, Arc::new(backend), &settings.backend_url);

    let app = Router::new()
        .merge(common_routes())
        .merge(action_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes)),
        );

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(backend = %settings.backend_url, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
