use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::{auth, catalog, messages, users};

/// All `/api` routes. Routes under the guard reject unauthenticated callers with 401.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/users", get(users::list_users))
        .route("/api/themes", get(catalog::list_themes))
        .route("/api/voice-models", get(catalog::list_voice_models))
        .route("/api/music", get(catalog::list_music))
        .route("/api/health", get(health));

    let protected_routes = Router::new()
        .route("/api/me", get(users::me))
        .route(
            "/api/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
