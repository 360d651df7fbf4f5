//! Unit tests for the task module.

mod assignment_service_tests;

use std::sync::Arc;

use rstest::fixture;

use crate::clock::ManualClock;
use crate::identity::{
    adapters::PlatformProfileRepository,
    domain::{Principal, Role},
};
use crate::platform::adapters::memory::InMemoryDataStore;
use crate::task::{adapters::PlatformTaskRepository, services::TaskService};
use crate::test_support::{manual_clock, seed_profile};

pub(super) type TestService = TaskService<
    PlatformTaskRepository<InMemoryDataStore>,
    PlatformProfileRepository<InMemoryDataStore>,
    ManualClock,
>;

pub(super) struct Harness {
    pub(super) store: Arc<InMemoryDataStore>,
    pub(super) clock: Arc<ManualClock>,
    pub(super) service: TestService,
}

/// One roster member per role, plus a second member.
pub(super) struct Cast {
    pub(super) admin: Principal,
    pub(super) collaborator: Principal,
    pub(super) member: Principal,
    pub(super) other: Principal,
}

impl Harness {
    pub(super) async fn cast(&self) -> Cast {
        Cast {
            admin: seed_profile(&self.store, "Ada Admin", Role::Admin).await,
            collaborator: seed_profile(&self.store, "Cole Collab", Role::Collaborator).await,
            member: seed_profile(&self.store, "Mia Member", Role::Member).await,
            other: seed_profile(&self.store, "Otto Other", Role::Member).await,
        }
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    let store = Arc::new(InMemoryDataStore::new());
    let clock = manual_clock();
    let service = TaskService::new(
        Arc::new(PlatformTaskRepository::new(Arc::clone(&store))),
        Arc::new(PlatformProfileRepository::new(Arc::clone(&store))),
        Arc::clone(&clock),
    );
    Harness {
        store,
        clock,
        service,
    }
}
