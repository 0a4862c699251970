use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::review_history;

/// Pedagogical context a review happened in. The interval ladder treats all
/// three the same; the mode is kept on every record for analytics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    /// Guided learning.
    #[default]
    #[serde(alias = "learn")]
    Flashcard,
    /// Structured review.
    #[serde(alias = "review")]
    Quiz,
    /// Unstructured cram.
    #[serde(alias = "cram")]
    Recall,
}

#[derive(Error, Debug)]
#[error("Unknown review mode: {0}")]
pub struct UnknownReviewMode(pub String);

impl ReviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewMode::Flashcard => "flashcard",
            ReviewMode::Quiz => "quiz",
            ReviewMode::Recall => "recall",
        }
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewMode {
    type Err = UnknownReviewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flashcard" | "learn" => Ok(ReviewMode::Flashcard),
            "quiz" | "review" => Ok(ReviewMode::Quiz),
            "recall" | "cram" => Ok(ReviewMode::Recall),
            other => Err(UnknownReviewMode(other.to_string())),
        }
    }
}

impl ToSql<Text, Sqlite> for ReviewMode {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for ReviewMode {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let value = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Ok(value.parse()?)
    }
}

/// One persisted review attempt. Rows are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = review_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ReviewHistoryRecord {
    #[serde(rename = "id")]
    pub review_id: i32,
    pub user_id: i32,
    pub flashcard_id: i32,
    pub review_mode: ReviewMode,
    pub is_correct: bool,
    pub review_date: NaiveDateTime,
    pub next_review_date: NaiveDateTime,
    pub interval_days: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = review_history)]
pub struct NewReviewHistoryRecord {
    pub user_id: i32,
    pub flashcard_id: i32,
    pub review_mode: ReviewMode,
    pub is_correct: bool,
    pub review_date: NaiveDateTime,
    pub next_review_date: NaiveDateTime,
    pub interval_days: i32,
}
