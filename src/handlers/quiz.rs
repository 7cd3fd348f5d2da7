// src/handlers/quiz.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::leads::{NewLead, persist_and_deliver},
    quiz::{bank, scoring},
    state::AppState,
};

/// DTO for sending a question to the client (point-vectors stay server-side).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: Vec<PublicOption>,
}

#[derive(Debug, Serialize)]
pub struct PublicOption {
    pub id: &'static str,
    pub text: &'static str,
}

/// Returns the question bank without scoring weights.
pub async fn list_questions() -> impl IntoResponse {
    let questions: Vec<PublicQuestion> = bank::QUESTIONS
        .iter()
        .map(|q| PublicQuestion {
            id: q.id,
            prompt: q.prompt,
            options: q
                .options
                .iter()
                .map(|o| PublicOption { id: o.id, text: o.text })
                .collect(),
        })
        .collect();

    Json(questions)
}

/// DTO for submitting a completed quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(
        email(message = "A valid email address is required."),
        length(max = 255, message = "Email must be at most 255 characters.")
    )]
    pub email: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub name: Option<String>,

    /// Complete answer set: question id -> chosen option id.
    pub answers: scoring::AnswerSet,
}

/// Scores a completed quiz, resolves the archetype, and runs the capture
/// pipeline (persist the lead, send the quiz-result email).
///
/// Answers arrive in one shot, fully validated before anything is stored;
/// partial quiz progress is never persisted.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let score = scoring::score_answers(&payload.answers)?;
    let archetype = score.resolve();
    let profile = archetype.profile();

    let lead = NewLead {
        email: payload.email,
        name: payload.name,
        source: archetype.source_tag(),
        archetype: Some(archetype),
        quiz_answers: Some(serde_json::to_value(&payload.answers)?),
    };

    let id = persist_and_deliver(&state, lead).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": id,
            "archetype": archetype,
            "profile": profile,
        })),
    ))
}
