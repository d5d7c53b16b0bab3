use axum::http::HeaderMap;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "courtbook_session";

/// Checks the credential pair against the configured admin account and issues
/// an opaque session token on success.
pub fn sign_in(state: &AppState, email: &str, password: &str) -> Result<String, AppError> {
    if email != state.config.admin_email || password != state.config.admin_password {
        return Err(AppError::Unauthorized);
    }

    let token = Uuid::new_v4().to_string();
    state.sessions.lock().unwrap().insert(token.clone());
    Ok(token)
}

/// Revokes the token if present; signing out twice is not an error.
pub fn sign_out(state: &AppState, token: &str) {
    state.sessions.lock().unwrap().remove(token);
}

pub fn is_authenticated(state: &AppState, headers: &HeaderMap) -> bool {
    match session_token(headers) {
        Some(token) => state.sessions.lock().unwrap().contains(&token),
        None => false,
    }
}

/// Explicit per-request gate: every protected handler calls this before
/// touching the store.
pub fn require_session(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    if is_authenticated(state, headers) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Pulls the session token from an Authorization bearer header or the
/// session cookie, in that order.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if let Some(token) = auth.strip_prefix("Bearer ") {
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    let cookies = headers.get("cookie").and_then(|v| v.to_str().ok())?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use crate::config::AppConfig;
    use crate::db;

    fn test_state() -> AppState {
        AppState {
            db: Arc::new(Mutex::new(db::init_db(":memory:").unwrap())),
            config: AppConfig {
                port: 3000,
                database_url: ":memory:".to_string(),
                admin_email: "admin@example.com".to_string(),
                admin_password: "secret".to_string(),
            },
            sessions: Mutex::new(HashSet::new()),
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {token}").parse().unwrap());
        headers
    }

    #[test]
    fn test_sign_in_issues_token() {
        let state = test_state();
        let token = sign_in(&state, "admin@example.com", "secret").unwrap();
        assert!(require_session(&state, &bearer(&token)).is_ok());
    }

    #[test]
    fn test_bad_credentials_rejected() {
        let state = test_state();
        assert!(matches!(
            sign_in(&state, "admin@example.com", "wrong"),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            sign_in(&state, "someone@else.com", "secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_sign_out_revokes_token() {
        let state = test_state();
        let token = sign_in(&state, "admin@example.com", "secret").unwrap();
        sign_out(&state, &token);
        assert!(require_session(&state, &bearer(&token)).is_err());
    }

    #[test]
    fn test_session_cookie_accepted() {
        let state = test_state();
        let token = sign_in(&state, "admin@example.com", "secret").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            format!("theme=dark; {SESSION_COOKIE}={token}")
                .parse()
                .unwrap(),
        );
        assert!(require_session(&state, &headers).is_ok());
    }

    #[test]
    fn test_unknown_token_rejected() {
        let state = test_state();
        assert!(require_session(&state, &bearer("not-a-session")).is_err());
    }
}
