// src/handlers/admin.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{application::Application, lead::Lead, purchase::{CreatePurchaseRequest, Purchase}},
};

/// Lists all captured leads, newest first.
/// Admin only.
pub async fn list_leads(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let leads = sqlx::query_as::<_, Lead>(
        r#"
        SELECT id, email, name, source, archetype, quiz_answers, created_at
        FROM leads
        ORDER BY id DESC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list leads: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(leads))
}

/// Lists all mentorship applications, newest first.
/// Admin only.
pub async fn list_applications(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let applications = sqlx::query_as::<_, Application>(
        r#"
        SELECT id, email, name, goals, obstacles, created_at
        FROM applications
        ORDER BY id DESC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list applications: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(applications))
}

/// Lists all purchases, newest first.
/// Admin only.
pub async fn list_purchases(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let purchases = sqlx::query_as::<_, Purchase>(
        r#"
        SELECT id, email, product, created_at
        FROM purchases
        ORDER BY id DESC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list purchases: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(purchases))
}

/// Manually grants a purchase (e.g. a comped masterclass seat).
/// Admin only; the payment processor writes real purchases out of band.
pub async fn create_purchase(
    State(pool): State<PgPool>,
    Json(payload): Json<CreatePurchaseRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO purchases (email, product)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(payload.email.trim().to_ascii_lowercase())
    .bind(&payload.product)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create purchase: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}
