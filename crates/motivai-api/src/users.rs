use axum::{Extension, Json, extract::State};

use motivai_types::models::User;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::{AppState, run_blocking};

/// GET /api/users. Public: the projection carries no password hash.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let rows = run_blocking(&state, |db| db.list_users()).await?;
    let users = rows
        .iter()
        .map(|row| row.to_public())
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(users))
}

/// GET /api/me
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}
