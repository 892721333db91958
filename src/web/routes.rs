//! Endpoint handlers
//!
//! Each handler runs the same pipeline: auth gate, field validation, then
//! the recorder and/or aggregator, short-circuiting on the first failure.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::auth::{self, AuthError};
use crate::error::ApiError;
use crate::events::{GpsQuery, SmsBody, ViewQuery};
use crate::stats::{self, ViewCounts};

fn auth_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// GET /log: record one GPS fix for the authenticated user.
///
/// A missing or malformed Authorization header is a 400 here; only a
/// credential mismatch earns the 401.
pub async fn gps_log(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<GpsQuery>,
) -> Result<&'static str, ApiError> {
    let username = auth::authorize(&state.db, auth_header(&headers))
        .await
        .map_err(|e| match e {
            AuthError::Malformed => {
                ApiError::BadRequest("Authorization header must be a Basic auth header")
            }
            AuthError::BadCredentials => ApiError::Unauthorized,
            AuthError::Store(e) => ApiError::Internal(e),
        })?;

    let fix = query.into_fix(username)?;
    state.db.insert_gps(&fix).await?;

    tracing::info!("gps fix recorded for {}", fix.username);
    Ok("Hello World!")
}

/// GET /site/view: report rolling view counts for a page, then record the
/// new view. Counting runs strictly before the insert, so a request never
/// sees its own hit in the numbers it gets back.
pub async fn site_view(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewCounts>, ApiError> {
    auth::authorize(&state.db, auth_header(&headers))
        .await
        .map_err(|e| match e {
            AuthError::Store(e) => ApiError::Internal(e),
            // no detail for the public-facing counter
            _ => ApiError::Unauthorized,
        })?;

    let (site_base, site_path) = query.into_key()?;

    let now = stats::now_epoch_seconds();
    let counts = stats::aggregate(&state.db, &site_base, &site_path, now).await?;

    state.db.insert_view(&site_base, &site_path, now).await?;

    Ok(Json(counts))
}

/// POST /sms-log: record one forwarded SMS.
///
/// Callers without the expected User-Agent marker get a bare 404 and no
/// write; the endpoint does not exist for them. Everything past that gate
/// fails with an honest status code.
pub async fn sms_log(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<&'static str, ApiError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !user_agent.contains(&state.config.sms.user_agent_marker) {
        return Err(ApiError::NotFound);
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.contains("application/json") {
        return Err(ApiError::BadRequest("Expected application/json"));
    }

    let body: SmsBody = serde_json::from_str(&body)
        .map_err(|_| ApiError::BadRequest("Request body is invalid"))?;
    let message = body.into_message()?;

    state.db.insert_sms(&message).await?;

    tracing::info!("sms logged from {}", message.from);
    Ok("Logged")
}
