pub mod admin;
pub mod extract;
pub mod review;

use tower_sessions::Session;

use crate::features::review::ReviewError;
use crate::utils;

pub async fn current_user(session: &Session) -> Result<i32, ReviewError> {
    utils::get_current_user_id(session)
        .await
        .ok_or(ReviewError::Unauthorized)
}

/// Runs a blocking use case off the async workers.
pub async fn run_blocking<T, F>(f: F) -> Result<T, ReviewError>
where
    F: FnOnce() -> Result<T, ReviewError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
