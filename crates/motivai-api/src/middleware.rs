use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use motivai_types::models::User;

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};

/// The authenticated caller, placed in request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Validate the token in the Authorization header and resolve the user it names.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = {
        let token = bearer_token(req.headers())
            .ok_or_else(|| ApiError::Unauthorized("Token is missing".into()))?;
        state.tokens.decode_token(token)?
    };

    let user = run_blocking(&state, move |db| db.get_user_by_id(user_id))
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;

    req.extensions_mut().insert(CurrentUser(user.to_public()?));
    Ok(next.run(req).await)
}

/// Header form is `<scheme> <token>`; the scheme itself is not checked.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .nth(1)
}
