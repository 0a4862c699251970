use axum::{
    extract::{Json, State},
    routing::delete,
    Router,
};
use tower_sessions::Session;

use super::extract::ApiPath;
use super::{current_user, run_blocking};
use crate::data::models::DeletionSummary;
use crate::features::review::ReviewError;
use crate::state::AppState;

async fn require_admin(state: &AppState, session: &Session) -> Result<i32, ReviewError> {
    let user_id = current_user(session).await?;
    if !state.is_admin(user_id) {
        log::warn!("User {} tried an admin review operation", user_id);
        return Err(ReviewError::Forbidden);
    }
    Ok(user_id)
}

pub async fn delete_user_reviews(
    State(state): State<AppState>,
    session: Session,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<DeletionSummary>, ReviewError> {
    require_admin(&state, &session).await?;

    let service = state.service.clone();
    let summary = run_blocking(move || service.delete_user_review_data(user_id)).await?;
    Ok(Json(summary))
}

pub async fn delete_flashcard_reviews(
    State(state): State<AppState>,
    session: Session,
    ApiPath(flashcard_id): ApiPath<i32>,
) -> Result<Json<DeletionSummary>, ReviewError> {
    require_admin(&state, &session).await?;

    let service = state.service.clone();
    let summary =
        run_blocking(move || service.delete_flashcard_review_data(flashcard_id)).await?;
    Ok(Json(summary))
}

pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route("/users/{user_id}/reviews", delete(delete_user_reviews))
        .route("/flashcards/{flashcard_id}/reviews", delete(delete_flashcard_reviews))
        .with_state(state)
}
