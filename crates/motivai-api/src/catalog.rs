use axum::{Json, extract::State};

use motivai_types::models::{BackgroundMusic, Theme, VoiceModel};

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};

pub async fn list_themes(State(state): State<AppState>) -> Result<Json<Vec<Theme>>, ApiError> {
    Ok(Json(run_blocking(&state, |db| db.list_themes()).await?))
}

pub async fn list_voice_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<VoiceModel>>, ApiError> {
    Ok(Json(run_blocking(&state, |db| db.list_voice_models()).await?))
}

pub async fn list_music(
    State(state): State<AppState>,
) -> Result<Json<Vec<BackgroundMusic>>, ApiError> {
    Ok(Json(run_blocking(&state, |db| db.list_background_music()).await?))
}
