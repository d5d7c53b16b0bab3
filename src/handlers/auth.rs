use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::auth::{self, SESSION_COOKIE};
use crate::state::AppState;

// POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = auth::sign_in(&state, &body.email, &body.password).map_err(|_| {
        tracing::warn!(email = %body.email, "failed login attempt");
        AppError::Unauthorized
    })?;

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(serde_json::json!({"ok": true, "token": token})),
    ))
}

// POST /api/auth/logout
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = auth::session_token(&headers) {
        auth::sign_out(&state, &token);
    }

    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(serde_json::json!({"ok": true})),
    )
}

// GET /api/auth/session
pub async fn session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let authenticated = auth::is_authenticated(&state, &headers);
    Json(serde_json::json!({"authenticated": authenticated}))
}
