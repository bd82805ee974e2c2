//! In-memory adapters for waitlist persistence.

mod repository;

pub use repository::InMemoryWaitlistRepository;
