use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::data::models::ReviewHistoryRecord;

/// Interval rungs in days. A correct answer climbs one rung, a miss drops
/// back to the first; the last rung is a plateau.
pub const INTERVAL_LADDER: [i32; 3] = [1, 3, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledInterval {
    pub interval_days: i32,
    pub next_review_date: NaiveDateTime,
}

/// Computes the next interval for a card.
///
/// `history` holds the card's prior reviews, newest first; only the latest
/// one matters. `now` is the moment the new answer is recorded.
pub fn calculate_next_interval(
    history: &[ReviewHistoryRecord],
    latest_is_correct: bool,
    now: NaiveDateTime,
) -> ScheduledInterval {
    let previous = history.first().map(|review| review.interval_days);
    let interval_days = next_interval_days(previous, latest_is_correct);

    ScheduledInterval {
        interval_days,
        next_review_date: next_review_date(now, interval_days),
    }
}

pub fn next_interval_days(previous_interval: Option<i32>, is_correct: bool) -> i32 {
    let first = INTERVAL_LADDER[0];
    let last = INTERVAL_LADDER[INTERVAL_LADDER.len() - 1];

    match previous_interval {
        None => first,
        Some(_) if !is_correct => first,
        Some(previous) => {
            let previous = previous.max(first);
            INTERVAL_LADDER
                .iter()
                .copied()
                .find(|&rung| rung > previous)
                .unwrap_or(last)
        }
    }
}

/// Midnight (UTC) of the day `interval_days` after `now`. Due status flips
/// on day boundaries only.
pub fn next_review_date(now: NaiveDateTime, interval_days: i32) -> NaiveDateTime {
    (now.date() + Duration::days(i64::from(interval_days))).and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::ReviewMode;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn review(interval_days: i32, is_correct: bool) -> ReviewHistoryRecord {
        ReviewHistoryRecord {
            review_id: 1,
            user_id: 1,
            flashcard_id: 7,
            review_mode: ReviewMode::Flashcard,
            is_correct,
            review_date: at(2026, 10, 1, 9),
            next_review_date: at(2026, 10, 1, 0) + Duration::days(i64::from(interval_days)),
            interval_days,
        }
    }

    #[test]
    fn new_card_gets_one_day_either_way() {
        let now = at(2026, 10, 18, 14);
        for correct in [true, false] {
            let next = calculate_next_interval(&[], correct, now);
            assert_eq!(next.interval_days, 1);
            assert_eq!(next.next_review_date, at(2026, 10, 19, 0));
        }
    }

    #[test]
    fn correct_answers_climb_the_ladder() {
        let now = at(2026, 10, 18, 14);
        assert_eq!(calculate_next_interval(&[review(1, true)], true, now).interval_days, 3);
        assert_eq!(calculate_next_interval(&[review(3, true)], true, now).interval_days, 7);
    }

    #[test]
    fn plateau_holds_at_seven() {
        let now = at(2026, 10, 18, 14);
        assert_eq!(calculate_next_interval(&[review(7, true)], true, now).interval_days, 7);
        assert_eq!(calculate_next_interval(&[review(30, true)], true, now).interval_days, 7);
    }

    #[test]
    fn any_miss_resets_to_one() {
        let now = at(2026, 10, 18, 14);
        for previous in [1, 3, 7, 12] {
            let next = calculate_next_interval(&[review(previous, true)], false, now);
            assert_eq!(next.interval_days, 1, "previous interval {previous}");
        }
    }

    #[test]
    fn only_the_latest_review_counts() {
        let now = at(2026, 10, 18, 14);
        let history = vec![review(3, true), review(1, false), review(7, true)];
        assert_eq!(calculate_next_interval(&history, true, now).interval_days, 7);
    }

    #[test]
    fn off_ladder_intervals_snap_to_next_rung() {
        assert_eq!(next_interval_days(Some(2), true), 3);
        assert_eq!(next_interval_days(Some(5), true), 7);
        assert_eq!(next_interval_days(Some(0), true), 3);
        assert_eq!(next_interval_days(Some(-4), true), 3);
    }

    #[test]
    fn due_date_lands_on_midnight() {
        assert_eq!(next_review_date(at(2026, 10, 18, 23), 3), at(2026, 10, 21, 0));
        assert_eq!(next_review_date(at(2026, 12, 30, 1), 7), at(2027, 1, 6, 0));
    }
}
