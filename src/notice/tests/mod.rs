//! Unit tests for the notice module.

mod domain_tests;

use std::sync::Arc;

use rstest::fixture;

use crate::clock::ManualClock;
use crate::identity::domain::{Principal, Role};
use crate::notice::{adapters::PlatformNoticeRepository, services::NoticeService};
use crate::platform::adapters::memory::{InMemoryDataStore, InMemoryObjectStorage};
use crate::test_support::{manual_clock, seed_profile};

pub(super) const STORAGE_BASE: &str = "https://platform.test";

pub(super) type TestService = NoticeService<
    PlatformNoticeRepository<InMemoryDataStore>,
    InMemoryObjectStorage,
    ManualClock,
>;

pub(super) struct Harness {
    pub(super) store: Arc<InMemoryDataStore>,
    pub(super) storage: Arc<InMemoryObjectStorage>,
    pub(super) clock: Arc<ManualClock>,
    pub(super) service: TestService,
}

pub(super) struct Cast {
    pub(super) admin: Principal,
    pub(super) member: Principal,
}

impl Harness {
    pub(super) async fn cast(&self) -> Cast {
        Cast {
            admin: seed_profile(&self.store, "Ada Admin", Role::Admin).await,
            member: seed_profile(&self.store, "Mia Member", Role::Member).await,
        }
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    let store = Arc::new(InMemoryDataStore::new());
    let storage = Arc::new(InMemoryObjectStorage::new(STORAGE_BASE));
    let clock = manual_clock();
    let service = NoticeService::new(
        Arc::new(PlatformNoticeRepository::new(Arc::clone(&store))),
        Arc::clone(&storage),
        Arc::clone(&clock),
    );
    Harness {
        store,
        storage,
        clock,
        service,
    }
}
