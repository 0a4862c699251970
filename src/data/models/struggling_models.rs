use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::struggling_queue;

/// A card one learner keeps failing.
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = struggling_queue)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct StrugglingQueueEntry {
    pub user_id: i32,
    pub flashcard_id: i32,
    pub times_failed: i32,
    pub last_failed_at: NaiveDateTime,
    pub added_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = struggling_queue)]
pub struct NewStrugglingQueueEntry {
    pub user_id: i32,
    pub flashcard_id: i32,
    pub times_failed: i32,
    pub last_failed_at: NaiveDateTime,
    pub added_at: NaiveDateTime,
}

/// Listing row: queue entry joined with the card text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrugglingCard {
    pub flashcard_id: i32,
    pub question: String,
    pub answer: String,
    pub times_failed: i32,
    pub last_failed_at: NaiveDateTime,
    pub added_at: NaiveDateTime,
}
