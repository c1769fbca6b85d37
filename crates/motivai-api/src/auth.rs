use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use tracing::{info, warn};

use motivai_types::api::{AuthResponse, LoginRequest, RegisterRequest};
use motivai_types::models::UserSummary;

use crate::error::ApiError;
use crate::password::{hash_password, verify_password};
use crate::state::{AppState, run_blocking};

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 100;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let name = req.name.trim().to_string();
    let email = req.email.trim().to_string();
    validate_name(&name)?;
    validate_email(&email)?;
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".into()));
    }

    // Check if email is taken
    let lookup = email.clone();
    if run_blocking(&state, move |db| db.get_user_by_email(&lookup))
        .await?
        .is_some()
    {
        warn!("Registration rejected, email already in use");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    // A concurrent registration can still win the race; the UNIQUE constraint catches it.
    let (n, e) = (name.clone(), email.clone());
    let user_id = run_blocking(&state, move |db| db.create_user(&n, &e, &password_hash))
        .await?
        .ok_or_else(|| ApiError::Conflict("User already exists".into()))?;

    let token = state.tokens.generate_token(user_id)?;
    info!(user_id, "Registered new user");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".into(),
            token,
            user: UserSummary {
                id: user_id,
                name,
                email,
            },
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let invalid = || ApiError::Unauthorized("Invalid email or password".into());

    let email = req.email.trim().to_string();
    let user = run_blocking(&state, move |db| db.get_user_by_email(&email))
        .await?
        .ok_or_else(invalid)?;

    let password = req.password;
    let stored = user.password.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await?;
    if !matches {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid());
    }

    let token = state.tokens.generate_token(user.id)?;
    info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        message: "Login successful".into(),
        token,
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    }))
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::BadRequest(format!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::BadRequest("Email is required".into()));
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ApiError::BadRequest(format!(
            "Email must be at most {} characters",
            MAX_EMAIL_LEN
        )));
    }
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        return Err(ApiError::BadRequest("Email address is not valid".into()));
    }
    Ok(())
}
