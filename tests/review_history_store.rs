mod common;

use chrono::Duration;

use common::{add_card, at, create_pool, record_review, start_time};
use recall_engine::data::models::ReviewMode;
use recall_engine::data::repositories::{
    FlashcardRepository, ReviewHistoryRepository, StrugglingQueueRepository,
};

#[test]
fn saved_review_reads_back_as_latest() {
    let (_dir, pool) = create_pool();
    let mut conn = pool.get().unwrap();
    let card = add_card(&mut conn, "What is ownership?");

    let now = start_time();
    record_review(&mut conn, 1, card, false, now, at(2026, 10, 19, 0), 1);
    let second = record_review(
        &mut conn,
        1,
        card,
        true,
        now + Duration::hours(1),
        at(2026, 10, 21, 0),
        3,
    );

    let last = ReviewHistoryRepository::find_last_review(&mut conn, 1, card)
        .unwrap()
        .unwrap();
    assert_eq!(last.review_id, second);
    assert!(last.is_correct);
    assert_eq!(last.interval_days, 3);
    assert_eq!(last.review_mode, ReviewMode::Flashcard);

    let history = ReviewHistoryRepository::find_by_user_and_flashcard(&mut conn, 1, card).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].review_id, second);

    assert!(
        ReviewHistoryRepository::find_last_review(&mut conn, 2, card)
            .unwrap()
            .is_none()
    );
}

#[test]
fn never_reviewed_cards_are_due() {
    let (_dir, pool) = create_pool();
    let mut conn = pool.get().unwrap();
    let first = add_card(&mut conn, "Q1");
    let second = add_card(&mut conn, "Q2");

    let due = ReviewHistoryRepository::find_due_flashcards(&mut conn, 1, start_time(), None).unwrap();
    assert_eq!(due, vec![first, second]);
    assert_eq!(
        ReviewHistoryRepository::count_due_flashcards(&mut conn, 1, start_time()).unwrap(),
        2
    );
}

#[test]
fn due_predicate_uses_the_latest_review() {
    let (_dir, pool) = create_pool();
    let mut conn = pool.get().unwrap();
    let card = add_card(&mut conn, "Q");

    let now = start_time();
    record_review(&mut conn, 1, card, true, now, at(2026, 10, 19, 0), 1);

    let before = ReviewHistoryRepository::find_due_flashcards(&mut conn, 1, now, None).unwrap();
    assert!(before.is_empty());

    // due exactly at the scheduled instant
    let due = ReviewHistoryRepository::find_due_flashcards(&mut conn, 1, at(2026, 10, 19, 0), None)
        .unwrap();
    assert_eq!(due, vec![card]);

    // a newer review pushes it out again
    record_review(
        &mut conn,
        1,
        card,
        true,
        at(2026, 10, 19, 8),
        at(2026, 10, 22, 0),
        3,
    );
    let due = ReviewHistoryRepository::find_due_flashcards(&mut conn, 1, at(2026, 10, 20, 0), None)
        .unwrap();
    assert!(due.is_empty());

    // other learners are unaffected
    let due = ReviewHistoryRepository::find_due_flashcards(&mut conn, 2, now, None).unwrap();
    assert_eq!(due, vec![card]);
}

#[test]
fn overdue_cards_come_before_new_ones() {
    let (_dir, pool) = create_pool();
    let mut conn = pool.get().unwrap();
    let fresh = add_card(&mut conn, "fresh");
    let slightly_late = add_card(&mut conn, "slightly late");
    let very_late = add_card(&mut conn, "very late");

    record_review(
        &mut conn,
        1,
        slightly_late,
        true,
        at(2026, 10, 10, 9),
        at(2026, 10, 17, 0),
        7,
    );
    record_review(
        &mut conn,
        1,
        very_late,
        true,
        at(2026, 10, 1, 9),
        at(2026, 10, 2, 0),
        1,
    );

    let due = ReviewHistoryRepository::find_due_flashcards(&mut conn, 1, start_time(), None).unwrap();
    assert_eq!(due, vec![very_late, slightly_late, fresh]);

    let limited =
        ReviewHistoryRepository::find_due_flashcards(&mut conn, 1, start_time(), Some(2)).unwrap();
    assert_eq!(limited, vec![very_late, slightly_late]);
    assert_eq!(
        ReviewHistoryRepository::count_due_flashcards(&mut conn, 1, start_time()).unwrap(),
        3
    );
}

#[test]
fn counts_reviews_since_a_moment() {
    let (_dir, pool) = create_pool();
    let mut conn = pool.get().unwrap();
    let card = add_card(&mut conn, "Q");

    record_review(&mut conn, 1, card, true, at(2026, 10, 17, 22), at(2026, 10, 18, 0), 1);
    record_review(&mut conn, 1, card, false, at(2026, 10, 18, 8), at(2026, 10, 19, 0), 1);
    record_review(&mut conn, 1, card, true, at(2026, 10, 18, 9), at(2026, 10, 21, 0), 3);

    let counts =
        ReviewHistoryRepository::count_reviews_since(&mut conn, 1, at(2026, 10, 18, 0)).unwrap();
    assert_eq!(counts, (2, 1));
}

#[test]
fn repeated_failures_bump_the_queue_entry() {
    let (_dir, pool) = create_pool();
    let mut conn = pool.get().unwrap();
    let card = add_card(&mut conn, "Q");

    let first = StrugglingQueueRepository::record_failure(&mut conn, 1, card, start_time()).unwrap();
    assert_eq!(first.times_failed, 1);
    assert_eq!(first.added_at, start_time());

    let later = start_time() + Duration::hours(2);
    let second = StrugglingQueueRepository::record_failure(&mut conn, 1, card, later).unwrap();
    assert_eq!(second.times_failed, 2);
    assert_eq!(second.last_failed_at, later);
    assert_eq!(second.added_at, start_time());

    assert!(StrugglingQueueRepository::remove(&mut conn, 1, card).unwrap());
    assert!(!StrugglingQueueRepository::remove(&mut conn, 1, card).unwrap());
    assert!(StrugglingQueueRepository::find(&mut conn, 1, card).unwrap().is_none());
}

#[test]
fn struggling_list_is_most_failed_first() {
    let (_dir, pool) = create_pool();
    let mut conn = pool.get().unwrap();
    let once = add_card(&mut conn, "once");
    let thrice = add_card(&mut conn, "thrice");
    let twice = add_card(&mut conn, "twice");

    let now = start_time();
    StrugglingQueueRepository::record_failure(&mut conn, 1, once, now).unwrap();
    for _ in 0..3 {
        StrugglingQueueRepository::record_failure(&mut conn, 1, thrice, now).unwrap();
    }
    for _ in 0..2 {
        StrugglingQueueRepository::record_failure(&mut conn, 1, twice, now).unwrap();
    }
    StrugglingQueueRepository::record_failure(&mut conn, 2, once, now).unwrap();

    let listed = StrugglingQueueRepository::list(&mut conn, 1, None).unwrap();
    let ids: Vec<i32> = listed.iter().map(|c| c.flashcard_id).collect();
    assert_eq!(ids, vec![thrice, twice, once]);
    assert_eq!(listed[0].question, "thrice");
    assert_eq!(listed[0].times_failed, 3);

    let top = StrugglingQueueRepository::list(&mut conn, 1, Some(1)).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(StrugglingQueueRepository::count(&mut conn, 1).unwrap(), 3);
    assert_eq!(StrugglingQueueRepository::count(&mut conn, 2).unwrap(), 1);
}

#[test]
fn deletes_are_scoped() {
    let (_dir, pool) = create_pool();
    let mut conn = pool.get().unwrap();
    let a = add_card(&mut conn, "a");
    let b = add_card(&mut conn, "b");
    let now = start_time();
    let next = at(2026, 10, 19, 0);

    record_review(&mut conn, 1, a, false, now, next, 1);
    record_review(&mut conn, 1, b, false, now, next, 1);
    record_review(&mut conn, 2, a, false, now, next, 1);
    StrugglingQueueRepository::record_failure(&mut conn, 1, a, now).unwrap();
    StrugglingQueueRepository::record_failure(&mut conn, 2, a, now).unwrap();

    assert_eq!(ReviewHistoryRepository::delete_by_flashcard(&mut conn, a).unwrap(), 2);
    assert_eq!(StrugglingQueueRepository::delete_by_flashcard(&mut conn, a).unwrap(), 2);
    assert_eq!(ReviewHistoryRepository::delete_by_user(&mut conn, 1).unwrap(), 1);
    assert_eq!(StrugglingQueueRepository::delete_by_user(&mut conn, 1).unwrap(), 0);

    assert!(FlashcardRepository::delete(&mut conn, b).unwrap());
    let due = ReviewHistoryRepository::find_due_flashcards(&mut conn, 1, now, None).unwrap();
    assert_eq!(due, vec![a]);
}
