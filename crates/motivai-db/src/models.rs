//! Database row types. These map directly to SQLite rows; conversion into the
//! public `motivai-types` projections happens here so callers never see the
//! password column or raw timestamp text.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

use motivai_types::models::{Message, User};

pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

impl UserRow {
    pub fn to_public(&self) -> Result<User> {
        Ok(User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: parse_timestamp(&self.created_at)
                .with_context(|| format!("corrupt created_at on user {}", self.id))?,
        })
    }
}

pub struct MessageRow {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub audio_url: Option<String>,
    pub theme_id: String,
    pub voice_model_id: String,
    pub background_music_id: Option<String>,
    pub created_at: String,
}

impl TryFrom<MessageRow> for Message {
    type Error = anyhow::Error;

    fn try_from(row: MessageRow) -> Result<Self> {
        let created_at = parse_timestamp(&row.created_at)
            .with_context(|| format!("corrupt created_at on message {}", row.id))?;
        Ok(Message {
            id: row.id,
            content: row.content,
            audio_url: row.audio_url,
            theme_id: row.theme_id,
            voice_model_id: row.voice_model_id,
            background_music_id: row.background_music_id,
            created_at,
        })
    }
}

/// Fields supplied by the caller when composing a message.
pub struct NewMessage<'a> {
    pub user_id: i64,
    pub content: &'a str,
    pub audio_url: Option<&'a str>,
    pub theme_id: &'a str,
    pub voice_model_id: &'a str,
    pub background_music_id: Option<&'a str>,
}

/// The three fixed lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Themes,
    VoiceModels,
    BackgroundMusic,
}

impl Catalog {
    pub fn table(self) -> &'static str {
        match self {
            Catalog::Themes => "themes",
            Catalog::VoiceModels => "voice_models",
            Catalog::BackgroundMusic => "background_music",
        }
    }
}

/// SQLite's `datetime('now')` yields "YYYY-MM-DD HH:MM:SS" without a zone; treat it as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = raw.parse::<DateTime<Utc>>() {
        return Ok(ts);
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")?;
    Ok(naive.and_utc())
}
