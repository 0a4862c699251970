pub mod review;
pub mod scheduling;
pub mod session;
pub mod struggling;
