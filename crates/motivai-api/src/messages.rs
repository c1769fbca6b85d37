use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use motivai_db::models::{Catalog, MessageRow, NewMessage};
use motivai_types::api::CreateMessageRequest;
use motivai_types::models::Message;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::{AppState, run_blocking};

/// POST /api/messages: store a composed message for the caller.
pub async fn create_message(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let content = req.content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::BadRequest("Message content is required".into()));
    }
    let audio_url = non_blank(req.audio_url);
    let background_music_id = non_blank(req.background_music_id);
    let theme_id = req.theme_id;
    let voice_model_id = req.voice_model_id;
    let user_id = user.id;

    // Check references first so a bad id yields a 400 naming it rather than a bare FK failure.
    let outcome: Result<MessageRow, String> = run_blocking(&state, move |db| {
        if !db.catalog_contains(Catalog::Themes, &theme_id)? {
            return Ok(Err(format!("Unknown theme: {}", theme_id)));
        }
        if !db.catalog_contains(Catalog::VoiceModels, &voice_model_id)? {
            return Ok(Err(format!("Unknown voice model: {}", voice_model_id)));
        }
        if let Some(music_id) = &background_music_id {
            if !db.catalog_contains(Catalog::BackgroundMusic, music_id)? {
                return Ok(Err(format!("Unknown background music: {}", music_id)));
            }
        }

        let row = db.insert_message(&NewMessage {
            user_id,
            content: &content,
            audio_url: audio_url.as_deref(),
            theme_id: &theme_id,
            voice_model_id: &voice_model_id,
            background_music_id: background_music_id.as_deref(),
        })?;
        Ok(Ok(row))
    })
    .await?;

    let row = outcome.map_err(ApiError::BadRequest)?;
    info!(user_id, message_id = row.id, "Message created");

    Ok((StatusCode::CREATED, Json(Message::try_from(row)?)))
}

/// GET /api/messages: the caller's messages, newest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let rows = run_blocking(&state, move |db| db.messages_for_user(user.id)).await?;
    let messages = rows
        .into_iter()
        .map(Message::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(messages))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
