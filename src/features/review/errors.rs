use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("{0}")]
    Validation(String),
    #[error("Not logged in")]
    Unauthorized,
    #[error("Not allowed")]
    Forbidden,
    #[error("No cards are due for review")]
    NoDueCards,
    #[error("Review session not found")]
    SessionNotFound,
    #[error("Flashcard {0} not found")]
    FlashcardNotFound(i32),
    #[error("Flashcard {flashcard_id} is not the current card of this session")]
    FlashcardNotInSession { flashcard_id: i32 },
    #[error("Review store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Database error: {0}")]
    DatabaseError(diesel::result::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReviewError {
    /// Stable code clients can branch on.
    pub fn code(&self) -> &'static str {
        match self {
            ReviewError::Validation(_) => "VALIDATION_ERROR",
            ReviewError::Unauthorized => "UNAUTHORIZED",
            ReviewError::Forbidden => "FORBIDDEN",
            ReviewError::NoDueCards => "NO_DUE_CARDS",
            ReviewError::SessionNotFound => "SESSION_NOT_FOUND",
            ReviewError::FlashcardNotFound(_) => "FLASHCARD_NOT_FOUND",
            ReviewError::FlashcardNotInSession { .. } => "FLASHCARD_NOT_IN_SESSION",
            ReviewError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            ReviewError::DatabaseError(_) => "DATABASE_ERROR",
            ReviewError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Infrastructure failures; the caller may try again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReviewError::StoreUnavailable(_) | ReviewError::DatabaseError(_)
        )
    }
}
