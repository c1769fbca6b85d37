use serde::{Deserialize, Serialize};

use crate::models::UserSummary;

// -- JWT Claims --

/// Claims carried by every access token. `sub` is the user id in decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by both register and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMessageRequest {
    pub content: String,
    pub theme_id: String,
    pub voice_model_id: String,
    #[serde(default)]
    pub background_music_id: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
}

// -- Errors --

/// Uniform body for every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_rejects_unknown_fields() {
        let body = r#"{"name":"Ann","email":"ann@x.com","password":"secret","admin":true}"#;
        assert!(serde_json::from_str::<RegisterRequest>(body).is_err());
    }

    #[test]
    fn create_message_optional_fields_default_to_none() {
        let body = r#"{"content":"hi","theme_id":"joke","voice_model_id":"drew"}"#;
        let req: CreateMessageRequest = serde_json::from_str(body).unwrap();
        assert!(req.background_music_id.is_none());
        assert!(req.audio_url.is_none());
    }
}
