// Kept in sync by hand with migrations/001_review_engine.sql.

diesel::table! {
    flashcards (flashcard_id) {
        flashcard_id -> Integer,
        question -> Text,
        answer -> Text,
        difficulty -> Text,
    }
}

diesel::table! {
    review_history (review_id) {
        review_id -> Integer,
        user_id -> Integer,
        flashcard_id -> Integer,
        review_mode -> Text,
        is_correct -> Bool,
        review_date -> Timestamp,
        next_review_date -> Timestamp,
        interval_days -> Integer,
    }
}

diesel::table! {
    struggling_queue (user_id, flashcard_id) {
        user_id -> Integer,
        flashcard_id -> Integer,
        times_failed -> Integer,
        last_failed_at -> Timestamp,
        added_at -> Timestamp,
    }
}

diesel::joinable!(review_history -> flashcards (flashcard_id));
diesel::joinable!(struggling_queue -> flashcards (flashcard_id));

diesel::allow_tables_to_appear_in_same_query!(
    flashcards,
    review_history,
    struggling_queue,
);
