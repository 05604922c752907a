//! `POST /ask`: validate, answer, hand the answer to speech.

use std::sync::Arc;

use askvoice_core::Question;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::{debug, info};

use crate::dto::{AskRequest, AskResponse};
use crate::error::HttpError;
use crate::state::AppState;

/// `POST /ask`
///
/// The whole handling runs inside the admission controller, so request
/// validation is paced along with answering.
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, HttpError> {
    let limiter = Arc::clone(&state.limiter);
    limiter.run(|| handle(state, payload)).await
}

async fn handle(
    state: AppState,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, HttpError> {
    let Json(request) = payload?;
    let question = Question::parse(&request.message)?;
    info!(chars = question.as_str().chars().count(), "Question received");

    // A panic while answering surfaces as a 500
    let answers = Arc::clone(&state.answers);
    let result = tokio::spawn(async move { answers.answer(&question).await })
        .await
        .map_err(|e| HttpError::AskFailed(e.to_string()))?;

    let speech = Arc::clone(&state.speech);
    let text = result.text.clone();
    tokio::spawn(async move { speech.speak(text).await });
    debug!(sources = result.sources.len(), "Answer handed to speech");

    Ok(Json(AskResponse::from(result)))
}
