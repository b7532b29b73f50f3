//! Repository backends for the storage ports defined in `feedback-domain`.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryRepository;
pub use postgres::PostgresFeedbackRepository;
