//! Video metadata store.
//!
//! Records are owned by a user and carry the persisted location of their
//! published payload. The in-memory repository is the only backend.

pub mod error;
pub mod memory;
pub mod repo;

pub use error::{DbError, DbResult};
pub use memory::InMemoryVideoRepository;
pub use repo::VideoRepository;
