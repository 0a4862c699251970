use diesel::prelude::*;
use diesel::sql_types::Integer;
use thiserror::Error;

use crate::data::models::{FlashcardContent, NewFlashcard};
use crate::db::DbPool;
use crate::schema::flashcards;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Flashcard store unavailable: {0}")]
    Unavailable(String),
    #[error("Database error")]
    DatabaseError(#[from] diesel::result::Error),
}

/// Content lookup the review engine depends on but does not own.
pub trait FlashcardCatalog: Send + Sync {
    fn find_by_id(&self, flashcard_id: i32) -> Result<Option<FlashcardContent>, CatalogError>;
}

pub struct FlashcardRepository;

impl FlashcardRepository {
    pub fn find_by_id(
        conn: &mut SqliteConnection,
        flashcard_id: i32,
    ) -> QueryResult<Option<FlashcardContent>> {
        flashcards::table
            .find(flashcard_id)
            .select(FlashcardContent::as_select())
            .first(conn)
            .optional()
    }

    pub fn create(
        conn: &mut SqliteConnection,
        card: &NewFlashcard<'_>,
    ) -> QueryResult<FlashcardContent> {
        conn.transaction(|conn| {
            diesel::insert_into(flashcards::table)
                .values(card)
                .execute(conn)?;

            let flashcard_id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
                .get_result::<i32>(conn)?;

            flashcards::table
                .find(flashcard_id)
                .select(FlashcardContent::as_select())
                .first(conn)
        })
    }

    pub fn delete(conn: &mut SqliteConnection, flashcard_id: i32) -> QueryResult<bool> {
        diesel::delete(flashcards::table.find(flashcard_id))
            .execute(conn)
            .map(|n| n > 0)
    }
}

/// Catalog backed by the local `flashcards` table.
#[derive(Clone)]
pub struct DieselFlashcardCatalog {
    pool: DbPool,
}

impl DieselFlashcardCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl FlashcardCatalog for DieselFlashcardCatalog {
    fn find_by_id(&self, flashcard_id: i32) -> Result<Option<FlashcardContent>, CatalogError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        Ok(FlashcardRepository::find_by_id(&mut conn, flashcard_id)?)
    }
}
