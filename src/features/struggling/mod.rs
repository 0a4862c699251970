pub mod policy;
pub mod tracker;

pub use policy::StrugglingPolicy;
pub use tracker::{apply_outcome, StrugglingUpdate};
