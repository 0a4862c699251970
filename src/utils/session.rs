use tower_sessions::Session;

pub const USER_ID_KEY: &str = "user_id";

/// Stores the authenticated learner on the cookie session. Identity is
/// established elsewhere; this is the hand-off point.
pub async fn set_user_session(
    session: &Session,
    user_id: i32,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(USER_ID_KEY, user_id).await
}

pub async fn get_current_user_id(session: &Session) -> Option<i32> {
    match session.get::<i32>(USER_ID_KEY).await {
        Ok(user_id) => user_id,
        Err(e) => {
            log::error!("Failed to get user_id from session: {}", e);
            None
        }
    }
}
