// src/handlers/auth.rs

use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{Duration, Utc};
use serde_json::json;
use url::Url;
use validator::Validate;

use crate::{
    email::templates,
    error::AppError,
    models::magic_link::{MagicLink, RequestMagicLinkRequest, VerifyMagicLinkRequest},
    state::AppState,
    utils::{
        session::{AdminContext, clear_session_cookie, session_cookie},
        token::generate_token,
    },
};

const MAGIC_LINK_TTL_MINUTES: i64 = 15;
const SESSION_TTL_HOURS: i64 = 24;

/// Issues a single-use magic link for an allow-listed admin email.
///
/// Unauthorized addresses get the same generic 403 regardless of why; no
/// link record is created and nothing is sent for them.
pub async fn request_magic_link(
    State(state): State<AppState>,
    Json(payload): Json<RequestMagicLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    if !state.config.is_admin_email(&payload.email) {
        tracing::warn!("Magic link requested for non-admin address");
        return Err(AppError::Unauthorized);
    }

    let token = generate_token();
    let expires_at = Utc::now() + Duration::minutes(MAGIC_LINK_TTL_MINUTES);

    sqlx::query(
        "INSERT INTO magic_links (token, email, expires_at) VALUES ($1, $2, $3)",
    )
    .bind(&token)
    .bind(&payload.email)
    .bind(expires_at)
    .execute(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to store magic link: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let mut verify_url = Url::parse(&state.config.public_base_url)
        .and_then(|u| u.join("/admin/verify"))
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    verify_url.query_pairs_mut().append_pair("token", &token);

    let message = templates::magic_link_email(&payload.email, verify_url.as_str());
    state.mailer.send(&message).await.map_err(|e| {
        tracing::error!("Failed to send magic link email: {}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!("Magic link issued for {}", payload.email);

    Ok(Json(json!({"success": true})))
}

/// Exchanges a magic-link token for an admin session cookie.
///
/// Each failure mode is reported specifically (the token is the secret, not
/// the failure mode). The used-flag flip is a conditional UPDATE so that two
/// requests racing on the same token cannot both succeed.
pub async fn verify_magic_link(
    State(state): State<AppState>,
    Json(payload): Json<VerifyMagicLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let link = sqlx::query_as::<_, MagicLink>(
        "SELECT token, email, expires_at, used, created_at FROM magic_links WHERE token = $1",
    )
    .bind(&payload.token)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch magic link: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::InvalidToken)?;

    if link.used {
        return Err(AppError::AlreadyUsed);
    }

    if link.expires_at < Utc::now() {
        return Err(AppError::Expired);
    }

    // Atomic single-use flip. If a concurrent verification got here first,
    // zero rows match and this request observes AlreadyUsed.
    let marked = sqlx::query(
        "UPDATE magic_links SET used = TRUE WHERE token = $1 AND used = FALSE",
    )
    .bind(&payload.token)
    .execute(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to mark magic link used: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if marked.rows_affected() == 0 {
        return Err(AppError::AlreadyUsed);
    }

    let session_token = generate_token();
    let expires_at = Utc::now() + Duration::hours(SESSION_TTL_HOURS);

    sqlx::query(
        "INSERT INTO admin_sessions (token, email, expires_at) VALUES ($1, $2, $3)",
    )
    .bind(&session_token)
    .bind(&link.email)
    .bind(expires_at)
    .execute(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create session: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!("Admin session created for {}", link.email);

    let cookie = session_cookie(
        &session_token,
        SESSION_TTL_HOURS * 3600,
        state.config.secure_cookies(),
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({"success": true})),
    ))
}

/// Deletes the caller's session and clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
) -> Result<impl IntoResponse, AppError> {
    sqlx::query("DELETE FROM admin_sessions WHERE token = $1")
        .bind(&admin.token)
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete session: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    tracing::info!("Admin {} logged out", admin.email);

    Ok((
        StatusCode::OK,
        [(
            header::SET_COOKIE,
            clear_session_cookie(state.config.secure_cookies()),
        )],
        Json(json!({"success": true})),
    ))
}
