pub mod review_session;
pub mod store;

pub use review_session::{ReviewSession, SessionAdvance, SessionError};
pub use store::{InMemorySessionStore, SessionHandle, SessionRepository};
