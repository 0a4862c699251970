use std::time::Instant;

use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

use crate::data::models::{
    Progress, ReviewFlashcard, ReviewMode, SessionState, SessionSummary, SessionView,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("A review session needs at least one card")]
    Empty,
    #[error("Session is already completed")]
    AlreadyCompleted,
    #[error("Flashcard {actual} is not the current card of this session (expected {expected})")]
    CardMismatch { expected: i32, actual: i32 },
}

/// Where the cursor landed after an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAdvance {
    Next(ReviewFlashcard),
    Completed(SessionSummary),
}

/// One learner's bounded pass over a fixed snapshot of due cards.
///
/// The card list never changes after construction and the cursor only moves
/// forward: one step per recorded answer.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    id: String,
    user_id: i32,
    mode: ReviewMode,
    cards: Vec<ReviewFlashcard>,
    current_index: usize,
    reviewed_count: usize,
    correct_count: usize,
    started_at: NaiveDateTime,
    last_activity: Instant,
}

impl ReviewSession {
    pub fn new(
        user_id: i32,
        mode: ReviewMode,
        cards: Vec<ReviewFlashcard>,
        started_at: NaiveDateTime,
    ) -> Result<Self, SessionError> {
        if cards.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            mode,
            cards,
            current_index: 0,
            reviewed_count: 0,
            correct_count: 0,
            started_at,
            last_activity: Instant::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn mode(&self) -> ReviewMode {
        self.mode
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn reviewed_count(&self) -> usize {
        self.reviewed_count
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn state(&self) -> SessionState {
        if self.current_index < self.cards.len() {
            SessionState::Active
        } else {
            SessionState::Completed
        }
    }

    pub fn current_card(&self) -> Option<&ReviewFlashcard> {
        self.cards.get(self.current_index)
    }

    /// Position of the card on screen; once completed, the last card.
    pub fn progress(&self) -> Progress {
        let total = self.cards.len();
        Progress::new((self.current_index + 1).min(total), total)
    }

    /// Checks that `flashcard_id` is the card the learner is looking at.
    pub fn ensure_current(&self, flashcard_id: i32) -> Result<&ReviewFlashcard, SessionError> {
        let current = self.current_card().ok_or(SessionError::AlreadyCompleted)?;
        if current.id != flashcard_id {
            return Err(SessionError::CardMismatch {
                expected: current.id,
                actual: flashcard_id,
            });
        }
        Ok(current)
    }

    pub fn record_answer(
        &mut self,
        flashcard_id: i32,
        is_correct: bool,
    ) -> Result<SessionAdvance, SessionError> {
        self.ensure_current(flashcard_id)?;

        self.reviewed_count += 1;
        if is_correct {
            self.correct_count += 1;
        }
        self.current_index += 1;
        self.touch();

        // completion tracks the captured card count, whatever its size
        if self.reviewed_count >= self.cards.len() {
            return Ok(SessionAdvance::Completed(self.summary()));
        }

        match self.current_card() {
            Some(card) => Ok(SessionAdvance::Next(card.clone())),
            None => Ok(SessionAdvance::Completed(self.summary())),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        let accuracy_percent = if self.reviewed_count == 0 {
            0
        } else {
            (self.correct_count as f64 / self.reviewed_count as f64 * 100.0).round() as u32
        };
        SessionSummary {
            total_reviewed: self.reviewed_count,
            correct_count: self.correct_count,
            accuracy_percent,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id.clone(),
            mode: self.mode,
            state: self.state(),
            started_at: self.started_at,
            current_card: self.current_card().cloned(),
            progress: self.progress(),
            reviewed_count: self.reviewed_count,
            correct_count: self.correct_count,
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}
