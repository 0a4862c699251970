use diesel::prelude::*;
use serde::Serialize;

use crate::schema::flashcards;

/// Card content owned by the content subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = flashcards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FlashcardContent {
    #[serde(rename = "id")]
    pub flashcard_id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = flashcards)]
pub struct NewFlashcard<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub difficulty: &'a str,
}
