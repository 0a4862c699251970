#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::SqliteConnection;
use tempfile::TempDir;

use recall_engine::data::models::{NewFlashcard, NewReviewHistoryRecord, ReviewMode};
use recall_engine::data::repositories::{
    DieselFlashcardCatalog, FlashcardRepository, ReviewHistoryRepository,
};
use recall_engine::db::{self, DbConn, DbPool};
use recall_engine::features::review::{ManualClock, ReviewService, ReviewSettings};
use recall_engine::features::session::InMemorySessionStore;
use recall_engine::features::struggling::StrugglingPolicy;

pub struct TestEnv {
    _dir: TempDir,
    pub pool: DbPool,
    pub clock: Arc<ManualClock>,
    pub service: ReviewService,
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

pub fn start_time() -> NaiveDateTime {
    at(2026, 10, 18, 9)
}

pub fn create_pool() -> (TempDir, DbPool) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("review.db");
    let pool = db::create_pool(path.to_str().unwrap()).expect("failed to create pool");
    {
        let mut conn = pool.get().unwrap();
        db::run_migrations(&mut conn).expect("failed to run migrations");
    }
    (dir, pool)
}

pub fn setup() -> TestEnv {
    setup_with_policy(StrugglingPolicy::default())
}

pub fn setup_with_policy(struggling: StrugglingPolicy) -> TestEnv {
    let (dir, pool) = create_pool();
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = ReviewService::new(
        pool.clone(),
        Arc::new(DieselFlashcardCatalog::new(pool.clone())),
        Arc::new(InMemorySessionStore::new()),
        ReviewSettings {
            struggling,
            ..ReviewSettings::default()
        },
    )
    .with_clock(clock.clone());

    TestEnv {
        _dir: dir,
        pool,
        clock,
        service,
    }
}

impl TestEnv {
    pub fn conn(&self) -> DbConn {
        self.pool.get().unwrap()
    }

    pub fn add_card(&self, question: &str) -> i32 {
        add_card(&mut self.conn(), question)
    }

    pub fn add_cards(&self, count: usize) -> Vec<i32> {
        (1..=count).map(|i| self.add_card(&format!("Question {i}"))).collect()
    }
}

pub fn add_card(conn: &mut SqliteConnection, question: &str) -> i32 {
    FlashcardRepository::create(
        conn,
        &NewFlashcard {
            question,
            answer: "answer",
            difficulty: "medium",
        },
    )
    .unwrap()
    .flashcard_id
}

pub fn record_review(
    conn: &mut SqliteConnection,
    user_id: i32,
    flashcard_id: i32,
    is_correct: bool,
    review_date: NaiveDateTime,
    next_review_date: NaiveDateTime,
    interval_days: i32,
) -> i32 {
    ReviewHistoryRepository::save(
        conn,
        &NewReviewHistoryRecord {
            user_id,
            flashcard_id,
            review_mode: ReviewMode::Flashcard,
            is_correct,
            review_date,
            next_review_date,
            interval_days,
        },
    )
    .unwrap()
    .review_id
}
