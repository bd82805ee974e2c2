//! Shared world state for waitlist signup BDD scenarios.

use std::sync::Arc;

use ibwt::waitlist::{
    adapters::memory::InMemoryWaitlistRepository,
    domain::WaitlistEntry,
    services::{WaitlistError, WaitlistService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestWaitlistService = WaitlistService<InMemoryWaitlistRepository, DefaultClock>;

/// Scenario world for waitlist behaviour tests.
pub struct WaitlistWorld {
    pub repository: Arc<InMemoryWaitlistRepository>,
    pub service: TestWaitlistService,
    pub last_result: Option<Result<WaitlistEntry, WaitlistError>>,
}

impl WaitlistWorld {
    /// Creates a world with an empty waitlist.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryWaitlistRepository::new());
        let service = WaitlistService::new(repository.clone(), Arc::new(DefaultClock));
        Self {
            repository,
            service,
            last_result: None,
        }
    }
}

impl Default for WaitlistWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WaitlistWorld {
    WaitlistWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
