pub mod auth;
pub mod catalog;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod password;
pub mod router;
pub mod state;
pub mod token;
pub mod users;

pub use router::router;
pub use state::{AppState, AppStateInner};
