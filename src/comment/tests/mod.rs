//! Unit tests for the comment module.


use std::sync::Arc;

use rstest::fixture;

use crate::clock::ManualClock;
use crate::comment::{adapters::PlatformCommentRepository, services::CommentService};
use crate::identity::domain::{Principal, Role};
use crate::platform::adapters::memory::InMemoryDataStore;
use crate::task::{
    adapters::PlatformTaskRepository,
    domain::{NewTask, Task, TaskId},
    ports::TaskRepository,
};
use crate::test_support::{manual_clock, seed_profile};

pub(super) type TestService = CommentService<
    PlatformCommentRepository<InMemoryDataStore>,
    PlatformTaskRepository<InMemoryDataStore>,
    ManualClock,
>;

pub(super) struct Harness {
    pub(super) store: Arc<InMemoryDataStore>,
    pub(super) clock: Arc<ManualClock>,
    pub(super) service: TestService,
}

/// An admin, a member and a task the member owns.
pub(super) struct Scene {
    pub(super) admin: Principal,
    pub(super) author: Principal,
    pub(super) task_id: TaskId,
}

impl Harness {
    pub(super) async fn scene(&self) -> Scene {
        let admin = seed_profile(&self.store, "Ada Admin", Role::Admin).await;
        let author = seed_profile(&self.store, "Mia Member", Role::Member).await;
        let task = Task::new(
            NewTask {
                title: "Write docs",
                description: None,
                due_date: None,
                primary_poc: (author.id(), author.display_name()),
                creator: &admin,
            },
            &*self.clock,
        )
        .expect("task");
        PlatformTaskRepository::new(Arc::clone(&self.store))
            .store(&task)
            .await
            .expect("store task");
        Scene {
            admin,
            author,
            task_id: task.id(),
        }
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    let store = Arc::new(InMemoryDataStore::new());
    let clock = manual_clock();
    let service = CommentService::new(
        Arc::new(PlatformCommentRepository::new(Arc::clone(&store))),
        Arc::new(PlatformTaskRepository::new(Arc::clone(&store))),
        Arc::clone(&clock),
    );
    Harness {
        store,
        clock,
        service,
    }
}
