// src/handlers/masterclass.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::purchase::{MASTERCLASS_PRODUCT, Purchase},
};

#[derive(Debug, Deserialize)]
pub struct AccessQuery {
    pub email: String,
}

/// Gates masterclass video access on an existing Purchase record.
///
/// Purchases are written by the payment processor's flow; this endpoint only
/// reads them by email.
pub async fn check_access(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Query(query): Query<AccessQuery>,
) -> Result<impl IntoResponse, AppError> {
    let purchase = sqlx::query_as::<_, Purchase>(
        r#"
        SELECT id, email, product, created_at
        FROM purchases
        WHERE email = $1 AND product = $2
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .bind(query.email.trim().to_ascii_lowercase())
    .bind(MASTERCLASS_PRODUCT)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch purchase: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    match purchase {
        Some(_) => Ok(Json(json!({
            "access": true,
            "video_url": config.masterclass_video_url,
        }))),
        None => Ok(Json(json!({"access": false}))),
    }
}
