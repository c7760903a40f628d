//! axum server: routes and shared state.

mod routes;
mod state;

pub use routes::{build_app, HEALTH_PATH, SECRET_TOKEN_HEADER, SET_WEBHOOK_PATH};
pub use state::AppState;
