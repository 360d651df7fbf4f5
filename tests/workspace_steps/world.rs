//! Shared world state for workspace BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rstest::fixture;
use teamdesk::attendance::{adapters::PlatformAttendanceRepository, services::AttendanceService};
use teamdesk::clock::ManualClock;
use teamdesk::comment::{
    adapters::PlatformCommentRepository, domain::Comment, services::CommentService,
};
use teamdesk::error::ErrorKind;
use teamdesk::identity::{
    adapters::PlatformProfileRepository,
    domain::{Principal, ProfileId, Role},
    ports::ProfileRepository,
    services::ProfileService,
};
use teamdesk::notice::{adapters::PlatformNoticeRepository, services::NoticeService};
use teamdesk::platform::adapters::memory::{InMemoryDataStore, InMemoryObjectStorage};
use teamdesk::task::{adapters::PlatformTaskRepository, domain::Task, services::TaskService};

type Store = InMemoryDataStore;
type Profiles = PlatformProfileRepository<Store>;
type Tasks = PlatformTaskRepository<Store>;

/// Scenario world wiring every service over one in-memory platform.
pub struct WorkspaceWorld {
    pub clock: Arc<ManualClock>,
    pub profile_repo: Arc<Profiles>,
    pub profiles: ProfileService<Profiles, ManualClock>,
    pub tasks: TaskService<Tasks, Profiles, ManualClock>,
    pub comments: CommentService<PlatformCommentRepository<Store>, Tasks, ManualClock>,
    pub attendance: AttendanceService<PlatformAttendanceRepository<Store>, Profiles, ManualClock>,
    pub notices: NoticeService<PlatformNoticeRepository<Store>, InMemoryObjectStorage, ManualClock>,
    pub people: HashMap<String, Principal>,
    pub task: Option<Task>,
    pub comment: Option<Comment>,
    pub last_error: Option<ErrorKind>,
}

/// Monday 2 March 2026, 09:00 UTC.
fn start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-02T09:00:00Z")
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_default()
}

impl WorkspaceWorld {
    /// Creates a world over an empty platform.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryDataStore::new());
        let storage = Arc::new(InMemoryObjectStorage::new("https://platform.test"));
        let clock = Arc::new(ManualClock::new(start()));
        let profile_repo = Arc::new(PlatformProfileRepository::new(Arc::clone(&store)));
        let task_repo = Arc::new(PlatformTaskRepository::new(Arc::clone(&store)));

        Self {
            profiles: ProfileService::new(Arc::clone(&profile_repo), Arc::clone(&clock)),
            tasks: TaskService::new(
                Arc::clone(&task_repo),
                Arc::clone(&profile_repo),
                Arc::clone(&clock),
            ),
            comments: CommentService::new(
                Arc::new(PlatformCommentRepository::new(Arc::clone(&store))),
                task_repo,
                Arc::clone(&clock),
            ),
            attendance: AttendanceService::new(
                Arc::new(PlatformAttendanceRepository::new(Arc::clone(&store))),
                Arc::clone(&profile_repo),
                Arc::clone(&clock),
            ),
            notices: NoticeService::new(
                Arc::new(PlatformNoticeRepository::new(Arc::clone(&store))),
                storage,
                Arc::clone(&clock),
            ),
            clock,
            profile_repo,
            people: HashMap::new(),
            task: None,
            comment: None,
            last_error: None,
        }
    }

    /// Provisions a person and gives them `role`.
    ///
    /// # Errors
    ///
    /// Returns an error when provisioning or the role update fails.
    pub fn add_person(&mut self, name: &str, role: Role) -> Result<(), eyre::Report> {
        let id = ProfileId::new();
        let email = format!("{}@example.com", name.to_lowercase());
        let mut profile = run_async(self.profiles.provision_profile(id, &email, Some(name)))?;
        profile.set_role(role, &*self.clock);
        run_async(self.profile_repo.update(&profile))?;
        self.people.insert(name.to_owned(), profile.principal());
        Ok(())
    }

    /// Looks up a person added earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no such person was added.
    pub fn person(&self, name: &str) -> Result<Principal, eyre::Report> {
        self.people
            .get(name)
            .cloned()
            .ok_or_else(|| eyre::eyre!("unknown person in scenario: {name}"))
    }

    /// Returns the scenario task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created.
    pub fn current_task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Returns the scenario comment.
    ///
    /// # Errors
    ///
    /// Returns an error when no comment was posted.
    pub fn current_comment(&self) -> Result<&Comment, eyre::Report> {
        self.comment
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing comment in scenario world"))
    }
}

impl Default for WorkspaceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WorkspaceWorld {
    WorkspaceWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
