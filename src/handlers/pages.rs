use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::services::auth::is_authenticated;
use crate::state::AppState;

static INDEX_HTML: &str = include_str!("../web/index.html");
static LOGIN_HTML: &str = include_str!("../web/login.html");
static ADMIN_HTML: &str = include_str!("../web/admin.html");

pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// An authenticated visit to /login bounces straight to the dashboard.
pub async fn login_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if is_authenticated(&state, &headers) {
        Redirect::to("/admin").into_response()
    } else {
        Html(LOGIN_HTML).into_response()
    }
}

// The session is rechecked on every navigation to the admin area.
pub async fn admin_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if is_authenticated(&state, &headers) {
        Html(ADMIN_HTML).into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}
