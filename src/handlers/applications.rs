// src/handlers/applications.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::application::CreateApplicationRequest,
    utils::html::clean_html,
};

/// Submits a mentorship application.
///
/// Free-text answers are sanitized before storage since they are rendered
/// in the admin dashboard. No email side effect.
pub async fn submit_application(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateApplicationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let goals = clean_html(&payload.goals);
    let obstacles = payload.obstacles.as_deref().map(clean_html);

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO applications (email, name, goals, obstacles)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&payload.email)
    .bind(&payload.name)
    .bind(&goals)
    .bind(&obstacles)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to persist application: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!("Application {} received", id);

    Ok((StatusCode::CREATED, Json(json!({"success": true, "id": id}))))
}
