use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_sessions::Session;
use validator::Validate;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{current_user, run_blocking};
use crate::data::models::{
    DueCardsResponse, LimitQuery, ReviewStats, SessionView, StartSessionRequest,
    StartSessionResponse, StrugglingCard, SubmitReviewRequest, SubmitReviewResponse,
};
use crate::features::review::ReviewError;
use crate::state::AppState;

pub async fn start_session(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<StartSessionRequest>,
) -> Result<(StatusCode, Json<StartSessionResponse>), ReviewError> {
    let user_id = current_user(&session).await?;
    payload.validate()?;

    let service = state.service.clone();
    let response = run_blocking(move || service.start_session(user_id, payload)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn submit_review(
    State(state): State<AppState>,
    session: Session,
    ApiPath(session_id): ApiPath<String>,
    ApiJson(payload): ApiJson<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>, ReviewError> {
    let user_id = current_user(&session).await?;
    payload.validate()?;

    let service = state.service.clone();
    let response =
        run_blocking(move || service.submit_review(user_id, &session_id, payload)).await?;
    Ok(Json(response))
}

pub async fn get_session(
    State(state): State<AppState>,
    session: Session,
    ApiPath(session_id): ApiPath<String>,
) -> Result<Json<SessionView>, ReviewError> {
    let user_id = current_user(&session).await?;

    // waits behind any answer still being applied to this session
    let service = state.service.clone();
    let view = run_blocking(move || service.get_session(user_id, &session_id)).await?;
    Ok(Json(view))
}

pub async fn abandon_session(
    State(state): State<AppState>,
    session: Session,
    ApiPath(session_id): ApiPath<String>,
) -> Result<StatusCode, ReviewError> {
    let user_id = current_user(&session).await?;
    state.service.abandon_session(user_id, &session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn due_cards(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> Result<Json<DueCardsResponse>, ReviewError> {
    let user_id = current_user(&session).await?;
    query.validate()?;

    let service = state.service.clone();
    let response = run_blocking(move || service.get_due_cards(user_id, query.limit)).await?;
    Ok(Json(response))
}

pub async fn struggling_cards(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> Result<Json<Vec<StrugglingCard>>, ReviewError> {
    let user_id = current_user(&session).await?;
    query.validate()?;

    let service = state.service.clone();
    let cards = run_blocking(move || service.list_struggling(user_id, query.limit)).await?;
    Ok(Json(cards))
}

pub async fn stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ReviewStats>, ReviewError> {
    let user_id = current_user(&session).await?;

    let service = state.service.clone();
    let stats = run_blocking(move || service.review_stats(user_id)).await?;
    Ok(Json(stats))
}

pub fn review_router(state: AppState) -> Router {
    Router::new()
        .route("/sessions", post(start_session))
        .route(
            "/sessions/{session_id}",
            get(get_session).delete(abandon_session),
        )
        .route("/sessions/{session_id}/answers", post(submit_review))
        .route("/due", get(due_cards))
        .route("/struggling", get(struggling_cards))
        .route("/stats", get(stats))
        .with_state(state)
}
