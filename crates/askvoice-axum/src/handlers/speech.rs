//! Axum handlers for speech control.

use askvoice_core::SpeechStatus;
use axum::Json;
use axum::extract::State;
use tracing::info;

use crate::dto::StopSpeechResponse;
use crate::error::HttpError;
use crate::state::AppState;

/// `POST /stop_speech`
pub async fn stop_speech(
    State(state): State<AppState>,
) -> Result<Json<StopSpeechResponse>, HttpError> {
    state.speech.stop_speech().await?;
    info!("Speech stopped on request");
    Ok(Json(StopSpeechResponse::success()))
}

/// `GET /speech_status`
pub async fn status(State(state): State<AppState>) -> Json<SpeechStatus> {
    Json(state.speech.status().await)
}
