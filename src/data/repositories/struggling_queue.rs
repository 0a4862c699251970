use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::data::models::{NewStrugglingQueueEntry, StrugglingCard, StrugglingQueueEntry};
use crate::schema::{flashcards, struggling_queue};

pub struct StrugglingQueueRepository;

impl StrugglingQueueRepository {
    pub fn find(
        conn: &mut SqliteConnection,
        user_id: i32,
        flashcard_id: i32,
    ) -> QueryResult<Option<StrugglingQueueEntry>> {
        struggling_queue::table
            .find((user_id, flashcard_id))
            .select(StrugglingQueueEntry::as_select())
            .first(conn)
            .optional()
    }

    /// Creates the entry with `times_failed = 1`, or bumps the counter of an
    /// existing one. A single statement, so concurrent failures all count.
    pub fn record_failure(
        conn: &mut SqliteConnection,
        user_id: i32,
        flashcard_id: i32,
        failed_at: NaiveDateTime,
    ) -> QueryResult<StrugglingQueueEntry> {
        diesel::insert_into(struggling_queue::table)
            .values(&NewStrugglingQueueEntry {
                user_id,
                flashcard_id,
                times_failed: 1,
                last_failed_at: failed_at,
                added_at: failed_at,
            })
            .on_conflict((struggling_queue::user_id, struggling_queue::flashcard_id))
            .do_update()
            .set((
                struggling_queue::times_failed.eq(struggling_queue::times_failed + 1),
                struggling_queue::last_failed_at.eq(failed_at),
            ))
            .execute(conn)?;

        struggling_queue::table
            .find((user_id, flashcard_id))
            .select(StrugglingQueueEntry::as_select())
            .first(conn)
    }

    pub fn remove(
        conn: &mut SqliteConnection,
        user_id: i32,
        flashcard_id: i32,
    ) -> QueryResult<bool> {
        diesel::delete(struggling_queue::table.find((user_id, flashcard_id)))
            .execute(conn)
            .map(|n| n > 0)
    }

    /// Most-failed first, ties broken by the most recent failure.
    pub fn list(
        conn: &mut SqliteConnection,
        user_id: i32,
        limit: Option<i64>,
    ) -> QueryResult<Vec<StrugglingCard>> {
        let mut query = struggling_queue::table
            .inner_join(flashcards::table)
            .filter(struggling_queue::user_id.eq(user_id))
            .order((
                struggling_queue::times_failed.desc(),
                struggling_queue::last_failed_at.desc(),
                struggling_queue::flashcard_id.asc(),
            ))
            .select((
                struggling_queue::flashcard_id,
                flashcards::question,
                flashcards::answer,
                struggling_queue::times_failed,
                struggling_queue::last_failed_at,
                struggling_queue::added_at,
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        Ok(query
            .load::<(i32, String, String, i32, NaiveDateTime, NaiveDateTime)>(conn)?
            .into_iter()
            .map(
                |(flashcard_id, question, answer, times_failed, last_failed_at, added_at)| {
                    StrugglingCard {
                        flashcard_id,
                        question,
                        answer,
                        times_failed,
                        last_failed_at,
                        added_at,
                    }
                },
            )
            .collect())
    }

    pub fn count(conn: &mut SqliteConnection, user_id: i32) -> QueryResult<i64> {
        struggling_queue::table
            .filter(struggling_queue::user_id.eq(user_id))
            .count()
            .get_result(conn)
    }

    pub fn delete_by_user(conn: &mut SqliteConnection, user_id: i32) -> QueryResult<usize> {
        diesel::delete(struggling_queue::table.filter(struggling_queue::user_id.eq(user_id)))
            .execute(conn)
    }

    pub fn delete_by_flashcard(
        conn: &mut SqliteConnection,
        flashcard_id: i32,
    ) -> QueryResult<usize> {
        diesel::delete(
            struggling_queue::table.filter(struggling_queue::flashcard_id.eq(flashcard_id)),
        )
        .execute(conn)
    }
}
