//! Web server module

mod routes;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::db::Database;
use crate::error::ApiError;

pub struct AppState {
    pub db: Database,
    pub config: Config,
}

/// Unknown paths get a bare 404.
async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Assemble the router. The CORS layer answers OPTIONS preflights before
/// routing or auth run. Preflight is unauthenticated by protocol, so the
/// allow-headers set mirrors whatever the browser asked for.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(Duration::from_secs(86400));

    Router::new()
        .route("/log", get(routes::gps_log))
        .route("/site/view", get(routes::site_view))
        .route("/sms-log", post(routes::sms_log))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(config: &Config, db: Database) -> Result<()> {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.http_port);
    info!("Collector listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
