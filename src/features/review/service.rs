use std::iter;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveTime;
use diesel::prelude::*;
use validator::Validate;

use super::clock::{Clock, SystemClock};
use super::errors::ReviewError;
use crate::data::models::{
    DeletionSummary, DueCard, DueCardsResponse, NewReviewHistoryRecord, ReviewEvent,
    ReviewFlashcard, ReviewHistoryRecord, ReviewStats, SessionView, StartSessionRequest,
    StartSessionResponse, StrugglingCard, SubmitResult, SubmitReviewRequest,
    SubmitReviewResponse,
};
use crate::data::repositories::{
    FlashcardCatalog, ReviewHistoryRepository, StrugglingQueueRepository,
};
use crate::db::{DbConn, DbPool};
use crate::features::scheduling::calculate_next_interval;
use crate::features::session::{ReviewSession, SessionAdvance, SessionRepository};
use crate::features::struggling::{apply_outcome, StrugglingPolicy, StrugglingUpdate};

#[derive(Debug, Clone)]
pub struct ReviewSettings {
    pub default_session_limit: i64,
    pub max_session_limit: i64,
    pub struggling: StrugglingPolicy,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            default_session_limit: 10,
            max_session_limit: 100,
            struggling: StrugglingPolicy::default(),
        }
    }
}

/// The review engine's use cases. Every method is blocking; async callers
/// run them on the blocking pool.
pub struct ReviewService {
    pool: DbPool,
    catalog: Arc<dyn FlashcardCatalog>,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    settings: ReviewSettings,
}

impl ReviewService {
    pub fn new(
        pool: DbPool,
        catalog: Arc<dyn FlashcardCatalog>,
        sessions: Arc<dyn SessionRepository>,
        settings: ReviewSettings,
    ) -> Self {
        Self {
            pool,
            catalog,
            sessions,
            clock: Arc::new(SystemClock),
            settings,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn conn(&self) -> Result<DbConn, ReviewError> {
        self.pool.get().map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            ReviewError::from(e)
        })
    }

    /// Due cards for display, with their content and last review. Cards the
    /// catalog cannot resolve are left out.
    pub fn get_due_cards(
        &self,
        user_id: i32,
        limit: Option<i64>,
    ) -> Result<DueCardsResponse, ReviewError> {
        check_user(user_id)?;
        check_limit(limit)?;
        let now = self.clock.now();

        let (due, total_due) = {
            let mut conn = self.conn()?;
            let ids = ReviewHistoryRepository::find_due_flashcards(&mut conn, user_id, now, limit)?;
            let total_due = ReviewHistoryRepository::count_due_flashcards(&mut conn, user_id, now)?;
            let due = ids
                .into_iter()
                .map(|id| {
                    ReviewHistoryRepository::find_last_review(&mut conn, user_id, id)
                        .map(|last| (id, last))
                })
                .collect::<QueryResult<Vec<(i32, Option<ReviewHistoryRecord>)>>>()?;
            (due, total_due)
        };

        let mut cards = Vec::with_capacity(due.len());
        for (flashcard_id, last_review) in due {
            match self.catalog.find_by_id(flashcard_id) {
                Ok(Some(content)) => cards.push(DueCard::new(content, last_review.as_ref())),
                Ok(None) => log::warn!("Skipping due card {}: content not found", flashcard_id),
                Err(e) => log::warn!("Skipping due card {}: {}", flashcard_id, e),
            }
        }

        Ok(DueCardsResponse { cards, total_due })
    }

    pub fn start_session(
        &self,
        user_id: i32,
        request: StartSessionRequest,
    ) -> Result<StartSessionResponse, ReviewError> {
        check_user(user_id)?;
        request.validate()?;

        let mode = request.mode.unwrap_or_default();
        let limit = request.limit.unwrap_or(self.settings.default_session_limit);
        if limit > self.settings.max_session_limit {
            return Err(ReviewError::Validation(format!(
                "limit must be at most {}",
                self.settings.max_session_limit
            )));
        }

        let due = self.get_due_cards(user_id, Some(limit))?;
        let cards: Vec<ReviewFlashcard> = due.cards.into_iter().map(Into::into).collect();
        if cards.is_empty() {
            log::info!("User {} has no cards due", user_id);
            return Err(ReviewError::NoDueCards);
        }

        let session = ReviewSession::new(user_id, mode, cards, self.clock.now())?;
        let current_card = session.current_card().cloned().ok_or(ReviewError::NoDueCards)?;
        let response = StartSessionResponse {
            session_id: session.id().to_string(),
            mode,
            total_cards: session.total_cards(),
            current_card,
            progress: session.progress(),
        };
        self.sessions.insert(session);

        log::info!(
            "User {} started {} session {} with {} cards",
            user_id,
            mode,
            response.session_id,
            response.total_cards
        );
        Ok(response)
    }

    pub fn submit_review(
        &self,
        user_id: i32,
        session_id: &str,
        request: SubmitReviewRequest,
    ) -> Result<SubmitReviewResponse, ReviewError> {
        check_user(user_id)?;
        request.validate()?;
        let flashcard_id = request.flashcard_id;
        let is_correct = request.is_correct;

        let handle = self
            .sessions
            .get(user_id, session_id)
            .ok_or(ReviewError::SessionNotFound)?;
        // held until the answer is fully applied
        let mut session = handle.lock();
        session.ensure_current(flashcard_id)?;

        if self.catalog.find_by_id(flashcard_id)?.is_none() {
            return Err(ReviewError::FlashcardNotFound(flashcard_id));
        }

        let now = self.clock.now();
        let mode = session.mode();
        let policy = &self.settings.struggling;
        let mut conn = self.conn()?;

        let (record, update) = conn.immediate_transaction::<_, ReviewError, _>(|conn| {
            let history =
                ReviewHistoryRepository::find_by_user_and_flashcard(conn, user_id, flashcard_id)?;
            let scheduled = calculate_next_interval(&history, is_correct, now);

            let record = ReviewHistoryRepository::save(
                conn,
                &NewReviewHistoryRecord {
                    user_id,
                    flashcard_id,
                    review_mode: mode,
                    is_correct,
                    review_date: now,
                    next_review_date: scheduled.next_review_date,
                    interval_days: scheduled.interval_days,
                },
            )?;

            let outcomes: Vec<bool> = iter::once(is_correct)
                .chain(history.iter().map(|r| r.is_correct))
                .collect();
            let update = apply_outcome(conn, policy, user_id, flashcard_id, &outcomes, now)?;

            Ok((record, update))
        })?;

        let event = match (is_correct, &update) {
            (true, _) => ReviewEvent::Mastered,
            (false, StrugglingUpdate::Marked(_)) => ReviewEvent::MarkedStruggling,
            (false, _) => ReviewEvent::Struggled,
        };

        let advance = session.record_answer(flashcard_id, is_correct)?;
        let progress = session.progress();
        log::debug!(
            "User {} answered card {} in session {} ({:?}, next in {} days)",
            user_id,
            flashcard_id,
            session_id,
            event,
            record.interval_days
        );

        let response = match advance {
            SessionAdvance::Next(card) => SubmitReviewResponse {
                result: SubmitResult::Advanced,
                event,
                next_review_date: record.next_review_date,
                interval_days: record.interval_days,
                progress,
                next_card: Some(card),
                session_complete: None,
            },
            SessionAdvance::Completed(summary) => {
                drop(session);
                self.sessions.remove(user_id, session_id);
                log::info!(
                    "User {} completed session {}: {}/{} correct",
                    user_id,
                    session_id,
                    summary.correct_count,
                    summary.total_reviewed
                );
                SubmitReviewResponse {
                    result: SubmitResult::Completed,
                    event,
                    next_review_date: record.next_review_date,
                    interval_days: record.interval_days,
                    progress,
                    next_card: None,
                    session_complete: Some(summary),
                }
            }
        };

        Ok(response)
    }

    pub fn get_session(&self, user_id: i32, session_id: &str) -> Result<SessionView, ReviewError> {
        check_user(user_id)?;
        let handle = self
            .sessions
            .get(user_id, session_id)
            .ok_or(ReviewError::SessionNotFound)?;
        let view = handle.lock().view();
        Ok(view)
    }

    /// Drops the in-memory session. Reviews already submitted stay recorded.
    pub fn abandon_session(&self, user_id: i32, session_id: &str) -> Result<(), ReviewError> {
        check_user(user_id)?;
        if !self.sessions.remove(user_id, session_id) {
            return Err(ReviewError::SessionNotFound);
        }
        log::info!("User {} abandoned session {}", user_id, session_id);
        Ok(())
    }

    pub fn list_struggling(
        &self,
        user_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<StrugglingCard>, ReviewError> {
        check_user(user_id)?;
        check_limit(limit)?;
        let mut conn = self.conn()?;
        Ok(StrugglingQueueRepository::list(&mut conn, user_id, limit)?)
    }

    pub fn review_stats(&self, user_id: i32) -> Result<ReviewStats, ReviewError> {
        check_user(user_id)?;
        let now = self.clock.now();
        let start_of_day = now.date().and_time(NaiveTime::MIN);
        let mut conn = self.conn()?;

        let due_count = ReviewHistoryRepository::count_due_flashcards(&mut conn, user_id, now)?;
        let struggling_count = StrugglingQueueRepository::count(&mut conn, user_id)?;
        let (reviewed_today, correct_today) =
            ReviewHistoryRepository::count_reviews_since(&mut conn, user_id, start_of_day)?;

        let accuracy_today = if reviewed_today == 0 {
            0
        } else {
            (correct_today as f64 / reviewed_today as f64 * 100.0).round() as u32
        };

        Ok(ReviewStats {
            due_count,
            struggling_count,
            reviewed_today,
            correct_today,
            accuracy_today,
        })
    }

    pub fn delete_user_review_data(&self, user_id: i32) -> Result<DeletionSummary, ReviewError> {
        check_user(user_id)?;
        let mut conn = self.conn()?;
        let (deleted_reviews, deleted_struggling) =
            conn.immediate_transaction::<_, ReviewError, _>(|conn| {
                Ok((
                    ReviewHistoryRepository::delete_by_user(conn, user_id)?,
                    StrugglingQueueRepository::delete_by_user(conn, user_id)?,
                ))
            })?;
        log::info!(
            "Deleted {} reviews and {} struggling entries of user {}",
            deleted_reviews,
            deleted_struggling,
            user_id
        );
        Ok(DeletionSummary {
            success: true,
            deleted_reviews,
            deleted_struggling,
        })
    }

    pub fn delete_flashcard_review_data(
        &self,
        flashcard_id: i32,
    ) -> Result<DeletionSummary, ReviewError> {
        if flashcard_id <= 0 {
            return Err(ReviewError::Validation("flashcardId must be positive".into()));
        }
        let mut conn = self.conn()?;
        let (deleted_reviews, deleted_struggling) =
            conn.immediate_transaction::<_, ReviewError, _>(|conn| {
                Ok((
                    ReviewHistoryRepository::delete_by_flashcard(conn, flashcard_id)?,
                    StrugglingQueueRepository::delete_by_flashcard(conn, flashcard_id)?,
                ))
            })?;
        log::info!(
            "Deleted {} reviews and {} struggling entries of flashcard {}",
            deleted_reviews,
            deleted_struggling,
            flashcard_id
        );
        Ok(DeletionSummary {
            success: true,
            deleted_reviews,
            deleted_struggling,
        })
    }

    pub fn evict_idle_sessions(&self, ttl: Duration) -> usize {
        self.sessions.evict_idle(ttl)
    }
}

fn check_user(user_id: i32) -> Result<(), ReviewError> {
    if user_id <= 0 {
        return Err(ReviewError::Validation("userId must be positive".into()));
    }
    Ok(())
}

fn check_limit(limit: Option<i64>) -> Result<(), ReviewError> {
    match limit {
        Some(limit) if limit < 1 => Err(ReviewError::Validation(
            "limit must be at least 1".into(),
        )),
        _ => Ok(()),
    }
}
