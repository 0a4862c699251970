pub mod interval;

pub use interval::{calculate_next_interval, next_interval_days, next_review_date, ScheduledInterval, INTERVAL_LADDER};
