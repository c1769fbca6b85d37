use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public projection of a user. The password hash never leaves the database crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// The shorter projection returned alongside a freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceModel {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub preview_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundMusic {
    pub id: String,
    pub name: String,
    pub file: Option<String>,
    pub category: Option<String>,
}

/// A composed message. Only the owner ever sees it, so the owner id is implied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub audio_url: Option<String>,
    pub theme_id: String,
    pub voice_model_id: String,
    pub background_music_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
