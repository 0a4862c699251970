pub mod flashcard;
pub mod review_history;
pub mod struggling_queue;

pub use flashcard::{CatalogError, DieselFlashcardCatalog, FlashcardCatalog, FlashcardRepository};
pub use review_history::ReviewHistoryRepository;
pub use struggling_queue::StrugglingQueueRepository;
