pub mod flashcard_models;
pub mod review_models;
pub mod session_models;
pub mod struggling_models;

pub use flashcard_models::{FlashcardContent, NewFlashcard};
pub use review_models::{NewReviewHistoryRecord, ReviewHistoryRecord, ReviewMode, UnknownReviewMode};
pub use session_models::{
    DeletionSummary, DueCard, DueCardsResponse, LimitQuery, Progress, ReviewEvent,
    ReviewFlashcard, ReviewStats, SessionState, SessionSummary, SessionView,
    StartSessionRequest, StartSessionResponse, SubmitResult, SubmitReviewRequest,
    SubmitReviewResponse,
};
pub use struggling_models::{NewStrugglingQueueEntry, StrugglingCard, StrugglingQueueEntry};
