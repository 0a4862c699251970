pub mod clock;
pub mod error_conversions;
pub mod error_responses;
pub mod errors;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::ReviewError;
pub use service::{ReviewService, ReviewSettings};
