use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FlashcardContent, ReviewHistoryRecord, ReviewMode};

/// Snapshot of a card taken when a session starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFlashcard {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty: String,
    pub interval_days: i32,
    pub last_review_date: Option<NaiveDateTime>,
    pub next_review_date: Option<NaiveDateTime>,
}

/// A due card ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueCard {
    pub flashcard_id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty: String,
    pub is_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<NaiveDateTime>,
}

impl DueCard {
    pub fn new(content: FlashcardContent, last_review: Option<&ReviewHistoryRecord>) -> Self {
        Self {
            flashcard_id: content.flashcard_id,
            question: content.question,
            answer: content.answer,
            difficulty: content.difficulty,
            is_new: last_review.is_none(),
            interval_days: last_review.map(|r| r.interval_days),
            last_review_date: last_review.map(|r| r.review_date),
            next_review_date: last_review.map(|r| r.next_review_date),
        }
    }
}

impl From<DueCard> for ReviewFlashcard {
    fn from(card: DueCard) -> Self {
        Self {
            id: card.flashcard_id,
            question: card.question,
            answer: card.answer,
            difficulty: card.difficulty,
            // new cards start on the bottom rung
            interval_days: card.interval_days.unwrap_or(1),
            last_review_date: card.last_review_date,
            next_review_date: card.next_review_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueCardsResponse {
    pub cards: Vec<DueCard>,
    pub total_due: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percent: u32,
}

impl Progress {
    pub fn new(current: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            (current as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            current,
            total,
            percent,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct StartSessionRequest {
    pub mode: Option<ReviewMode>,
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
    pub mode: ReviewMode,
    pub total_cards: usize,
    pub current_card: ReviewFlashcard,
    pub progress: Progress,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    #[validate(range(min = 1, message = "flashcardId must be positive"))]
    pub flashcard_id: i32,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitResult {
    Advanced,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewEvent {
    /// Answered correctly.
    Mastered,
    /// Answered incorrectly, not (yet) in the struggling queue.
    Struggled,
    /// Answered incorrectly and the struggling policy fired.
    MarkedStruggling,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_reviewed: usize,
    pub correct_count: usize,
    pub accuracy_percent: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResponse {
    pub result: SubmitResult,
    pub event: ReviewEvent,
    pub next_review_date: NaiveDateTime,
    pub interval_days: i32,
    pub progress: Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_card: Option<ReviewFlashcard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_complete: Option<SessionSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Active,
    Completed,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: String,
    pub mode: ReviewMode,
    pub state: SessionState,
    pub started_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_card: Option<ReviewFlashcard>,
    pub progress: Progress,
    pub reviewed_count: usize,
    pub correct_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub due_count: i64,
    pub struggling_count: i64,
    pub reviewed_today: i64,
    pub correct_today: i64,
    pub accuracy_today: u32,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LimitQuery {
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionSummary {
    pub success: bool,
    pub deleted_reviews: usize,
    pub deleted_struggling: usize,
}
