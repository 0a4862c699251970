use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Timestamp};

use crate::data::models::{NewReviewHistoryRecord, ReviewHistoryRecord};
use crate::schema::review_history;

/// Cards the learner has never reviewed, plus cards whose most recent review
/// has come due. Reviewed cards come first, most overdue first.
const DUE_FLASHCARDS_SQL: &str = "
    SELECT f.flashcard_id AS flashcard_id
    FROM flashcards f
    LEFT JOIN review_history r ON r.review_id = (
        SELECT r2.review_id FROM review_history r2
        WHERE r2.user_id = ? AND r2.flashcard_id = f.flashcard_id
        ORDER BY r2.review_date DESC, r2.review_id DESC
        LIMIT 1
    )
    WHERE r.review_id IS NULL OR r.next_review_date <= ?
    ORDER BY r.review_id IS NULL, r.next_review_date ASC, f.flashcard_id ASC
    LIMIT ?";

const COUNT_DUE_SQL: &str = "
    SELECT COUNT(*) AS count
    FROM flashcards f
    LEFT JOIN review_history r ON r.review_id = (
        SELECT r2.review_id FROM review_history r2
        WHERE r2.user_id = ? AND r2.flashcard_id = f.flashcard_id
        ORDER BY r2.review_date DESC, r2.review_id DESC
        LIMIT 1
    )
    WHERE r.review_id IS NULL OR r.next_review_date <= ?";

#[derive(QueryableByName)]
struct DueRow {
    #[diesel(sql_type = Integer)]
    flashcard_id: i32,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

pub struct ReviewHistoryRepository;

impl ReviewHistoryRepository {
    pub fn find_last_review(
        conn: &mut SqliteConnection,
        user_id: i32,
        flashcard_id: i32,
    ) -> QueryResult<Option<ReviewHistoryRecord>> {
        review_history::table
            .filter(review_history::user_id.eq(user_id))
            .filter(review_history::flashcard_id.eq(flashcard_id))
            .order((review_history::review_date.desc(), review_history::review_id.desc()))
            .select(ReviewHistoryRecord::as_select())
            .first(conn)
            .optional()
    }

    /// Every review of one card by one learner, newest first.
    pub fn find_by_user_and_flashcard(
        conn: &mut SqliteConnection,
        user_id: i32,
        flashcard_id: i32,
    ) -> QueryResult<Vec<ReviewHistoryRecord>> {
        review_history::table
            .filter(review_history::user_id.eq(user_id))
            .filter(review_history::flashcard_id.eq(flashcard_id))
            .order((review_history::review_date.desc(), review_history::review_id.desc()))
            .select(ReviewHistoryRecord::as_select())
            .load(conn)
    }

    pub fn save(
        conn: &mut SqliteConnection,
        record: &NewReviewHistoryRecord,
    ) -> QueryResult<ReviewHistoryRecord> {
        conn.transaction(|conn| {
            diesel::insert_into(review_history::table)
                .values(record)
                .execute(conn)?;

            let review_id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
                .get_result::<i32>(conn)?;

            review_history::table
                .find(review_id)
                .select(ReviewHistoryRecord::as_select())
                .first(conn)
        })
    }

    /// Ids of the cards due for `user_id` at `now`. `None` means no limit.
    pub fn find_due_flashcards(
        conn: &mut SqliteConnection,
        user_id: i32,
        now: NaiveDateTime,
        limit: Option<i64>,
    ) -> QueryResult<Vec<i32>> {
        // SQLite reads a negative LIMIT as "no limit"
        let limit = limit.unwrap_or(-1);

        let rows = diesel::sql_query(DUE_FLASHCARDS_SQL)
            .bind::<Integer, _>(user_id)
            .bind::<Timestamp, _>(now)
            .bind::<BigInt, _>(limit)
            .load::<DueRow>(conn)?;

        Ok(rows.into_iter().map(|row| row.flashcard_id).collect())
    }

    pub fn count_due_flashcards(
        conn: &mut SqliteConnection,
        user_id: i32,
        now: NaiveDateTime,
    ) -> QueryResult<i64> {
        diesel::sql_query(COUNT_DUE_SQL)
            .bind::<Integer, _>(user_id)
            .bind::<Timestamp, _>(now)
            .get_result::<CountRow>(conn)
            .map(|row| row.count)
    }

    /// `(attempts, correct)` recorded by `user_id` at or after `since`.
    pub fn count_reviews_since(
        conn: &mut SqliteConnection,
        user_id: i32,
        since: NaiveDateTime,
    ) -> QueryResult<(i64, i64)> {
        let base = review_history::table
            .filter(review_history::user_id.eq(user_id))
            .filter(review_history::review_date.ge(since));

        let total = base.clone().count().get_result::<i64>(conn)?;
        let correct = base
            .filter(review_history::is_correct.eq(true))
            .count()
            .get_result::<i64>(conn)?;

        Ok((total, correct))
    }

    pub fn delete_by_user(conn: &mut SqliteConnection, user_id: i32) -> QueryResult<usize> {
        diesel::delete(review_history::table.filter(review_history::user_id.eq(user_id)))
            .execute(conn)
    }

    pub fn delete_by_flashcard(
        conn: &mut SqliteConnection,
        flashcard_id: i32,
    ) -> QueryResult<usize> {
        diesel::delete(review_history::table.filter(review_history::flashcard_id.eq(flashcard_id)))
            .execute(conn)
    }
}
