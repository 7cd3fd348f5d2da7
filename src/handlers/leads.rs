// src/handlers/leads.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    email::templates,
    error::AppError,
    models::lead::{CreateLeadRequest, MEDITATION_SOURCE},
    quiz::Archetype,
    state::AppState,
};

/// A validated lead ready for the capture pipeline.
pub struct NewLead {
    pub email: String,
    pub name: Option<String>,
    pub source: String,
    pub archetype: Option<Archetype>,
    pub quiz_answers: Option<serde_json::Value>,
}

/// Captures a lead from any funnel.
///
/// Validates, persists, then triggers at most one templated email keyed by
/// the lead's funnel. A delivery failure after persistence is reported as
/// such (with the saved id), never as a total failure.
pub async fn submit_lead(
    State(state): State<AppState>,
    Json(payload): Json<CreateLeadRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let quiz_answers = payload
        .quiz_answers
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    let lead = NewLead {
        email: payload.email,
        name: payload.name,
        source: payload.source,
        archetype: payload.quiz_result,
        quiz_answers,
    };

    let id = persist_and_deliver(&state, lead).await?;

    Ok((StatusCode::CREATED, Json(json!({"success": true, "id": id}))))
}

/// The capture pipeline shared by the generic lead endpoint and the quiz
/// submission endpoint.
///
/// Persistence happens first and unconditionally, so a delivery failure can
/// never lose the lead. Delivery branches, in priority order: resolved
/// archetype -> quiz-result email; meditation source -> meditation email;
/// anything else -> no email.
pub async fn persist_and_deliver(state: &AppState, lead: NewLead) -> Result<i64, AppError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO leads (email, name, source, archetype, quiz_answers)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&lead.email)
    .bind(&lead.name)
    .bind(&lead.source)
    .bind(lead.archetype.map(|a| a.as_str()))
    .bind(&lead.quiz_answers)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to persist lead: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!("Captured lead {} from source '{}'", id, lead.source);

    let message = if let Some(archetype) = lead.archetype {
        Some(templates::quiz_result_email(
            &lead.email,
            lead.name.as_deref(),
            archetype.profile(),
        ))
    } else if lead.source == MEDITATION_SOURCE {
        Some(templates::meditation_email(
            &lead.email,
            lead.name.as_deref(),
            &state.config.meditation_audio_url,
        ))
    } else {
        tracing::info!("Lead {} has no matching email template, skipping send", id);
        None
    };

    if let Some(message) = message {
        state.mailer.send(&message).await.map_err(|e| {
            // The lead is already saved; surface that, with its id, so the
            // send can be retried without duplicating the lead.
            tracing::error!("Delivery failed for lead {}: {}", id, e);
            AppError::DeliveryFailure { lead_id: id }
        })?;
    }

    Ok(id)
}
