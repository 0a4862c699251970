use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::policy::{leading_run, StrugglingPolicy};
use crate::data::models::StrugglingQueueEntry;
use crate::data::repositories::StrugglingQueueRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum StrugglingUpdate {
    Unchanged,
    /// The miss was recorded in the queue.
    Marked(StrugglingQueueEntry),
    /// The card left the queue.
    Graduated,
}

/// Applies the newest outcome for one card to the struggling queue.
///
/// `outcomes` runs newest first and already includes the answer being
/// recorded. Run it inside the transaction that wrote the review.
pub fn apply_outcome(
    conn: &mut SqliteConnection,
    policy: &StrugglingPolicy,
    user_id: i32,
    flashcard_id: i32,
    outcomes: &[bool],
    at: NaiveDateTime,
) -> QueryResult<StrugglingUpdate> {
    let Some(&latest) = outcomes.first() else {
        return Ok(StrugglingUpdate::Unchanged);
    };

    if latest {
        let streak = leading_run(outcomes, true);
        if policy.has_recovered(streak)
            && StrugglingQueueRepository::remove(conn, user_id, flashcard_id)?
        {
            log::debug!("Card {} left struggling queue of user {}", flashcard_id, user_id);
            return Ok(StrugglingUpdate::Graduated);
        }
        return Ok(StrugglingUpdate::Unchanged);
    }

    let queued = StrugglingQueueRepository::find(conn, user_id, flashcard_id)?.is_some();

    if queued || policy.is_struggling(outcomes) {
        let entry = StrugglingQueueRepository::record_failure(conn, user_id, flashcard_id, at)?;
        log::debug!(
            "Card {} struggling for user {} (times_failed = {})",
            flashcard_id,
            user_id,
            entry.times_failed
        );
        return Ok(StrugglingUpdate::Marked(entry));
    }

    Ok(StrugglingUpdate::Unchanged)
}
