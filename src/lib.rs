pub mod config;
pub mod data;
pub mod db;
pub mod features;
pub mod handlers;
pub mod schema;
pub mod state;
pub mod utils;
pub mod workers;

use axum::Router;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub use db::DbPool;
pub use state::AppState;

pub fn session_layer() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_secure(false)
}

/// Everything mounted under `/api`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/reviews", handlers::review::review_router(state.clone()))
        .nest("/admin", handlers::admin::admin_router(state))
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_router(state))
        .layer(session_layer())
}
