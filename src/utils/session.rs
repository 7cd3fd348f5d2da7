// src/utils/session.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::{error::AppError, models::magic_link::AdminSession, state::AppState};

/// Name of the session cookie set after magic-link verification.
pub const SESSION_COOKIE: &str = "admin_session";

/// Admin identity attached to the request after session validation.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub email: String,
    pub token: String,
}

/// Builds the Set-Cookie value for a fresh session.
///
/// `secure` should be true whenever the site is served over HTTPS (see
/// `Config::secure_cookies`); it is off only for plain-http local dev.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the Set-Cookie value that clears the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extracts the session token from the request's Cookie header.
fn session_token_from(req: &Request<Body>) -> Option<String> {
    let cookies = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// Axum Middleware: admin session validation.
///
/// Runs on every protected endpoint invocation; validity is never cached
/// across calls. Expiry is checked lazily here, and an expired session row
/// is deleted on sight.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token_from(&req).ok_or(AppError::Unauthenticated)?;

    let session = sqlx::query_as::<_, AdminSession>(
        "SELECT token, email, expires_at, created_at FROM admin_sessions WHERE token = $1",
    )
    .bind(&token)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch session: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::Unauthenticated)?;

    if session.expires_at < Utc::now() {
        sqlx::query("DELETE FROM admin_sessions WHERE token = $1")
            .bind(&token)
            .execute(&state.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete expired session: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;
        return Err(AppError::SessionExpired);
    }

    req.extensions_mut().insert(AdminContext {
        email: session.email,
        token,
    });

    Ok(next.run(req).await)
}
