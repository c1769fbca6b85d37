use std::sync::Arc;

use motivai_db::Database;

use crate::error::ApiError;
use crate::token::TokenKeys;

pub type AppState = Arc<AppStateInner>;

/// Built once at startup; read-only afterwards apart from the database connection.
pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenKeys,
}

impl AppStateInner {
    pub fn new(db: Database, jwt_secret: &str) -> AppState {
        Arc::new(Self {
            db,
            tokens: TokenKeys::new(jwt_secret),
        })
    }
}

/// Run a database call on the blocking pool, off the async runtime.
pub async fn run_blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    let value = tokio::task::spawn_blocking(move || f(&state.db)).await??;
    Ok(value)
}
