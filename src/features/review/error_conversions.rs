use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use diesel::result::Error as DieselError;
use tokio::task::JoinError;
use validator::ValidationErrors;

use super::errors::ReviewError;
use crate::data::repositories::CatalogError;
use crate::features::session::SessionError;

impl From<DieselError> for ReviewError {
    fn from(err: DieselError) -> Self {
        ReviewError::DatabaseError(err)
    }
}

impl From<r2d2::Error> for ReviewError {
    fn from(err: r2d2::Error) -> Self {
        ReviewError::StoreUnavailable(err.to_string())
    }
}

impl From<CatalogError> for ReviewError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Unavailable(e) => ReviewError::StoreUnavailable(e),
            CatalogError::DatabaseError(e) => ReviewError::DatabaseError(e),
        }
    }
}

impl From<SessionError> for ReviewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Empty => ReviewError::NoDueCards,
            // finished sessions are discarded, so from outside they are gone
            SessionError::AlreadyCompleted => ReviewError::SessionNotFound,
            SessionError::CardMismatch { actual, .. } => ReviewError::FlashcardNotInSession {
                flashcard_id: actual,
            },
        }
    }
}

impl From<ValidationErrors> for ReviewError {
    fn from(err: ValidationErrors) -> Self {
        ReviewError::Validation(err.to_string())
    }
}

impl From<JoinError> for ReviewError {
    fn from(err: JoinError) -> Self {
        ReviewError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ReviewError {
    fn from(rejection: JsonRejection) -> Self {
        ReviewError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ReviewError {
    fn from(rejection: PathRejection) -> Self {
        ReviewError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ReviewError {
    fn from(rejection: QueryRejection) -> Self {
        ReviewError::Validation(rejection.body_text())
    }
}
