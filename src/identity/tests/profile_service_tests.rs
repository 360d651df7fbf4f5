//! Tests for profile resolution and roster administration.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use rstest::{fixture, rstest};

use crate::clock::ManualClock;
use crate::error::ErrorKind;
use crate::identity::{
    adapters::PlatformProfileRepository,
    domain::{Profile, ProfileId, ProfileUpdate, Role},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
    services::{ProfileService, ProfileServiceError},
};
use crate::platform::{
    adapters::memory::InMemoryDataStore,
    domain::{Collection, Query},
    ports::DataStore,
};
use crate::test_support::{manual_clock, record, seed_profile};

type TestService = ProfileService<PlatformProfileRepository<InMemoryDataStore>, ManualClock>;

struct Harness {
    store: Arc<InMemoryDataStore>,
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryDataStore::new());
    let service = ProfileService::new(
        Arc::new(PlatformProfileRepository::new(Arc::clone(&store))),
        manual_clock(),
    );
    Harness { store, service }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provisioning_is_idempotent_and_keeps_role(harness: Harness) {
    let id = ProfileId::new();
    let first = harness
        .service
        .provision_profile(id, "ada@example.com", Some("Ada"))
        .await
        .expect("provision");
    let admin = seed_profile(&harness.store, "Root", Role::Admin).await;
    harness
        .service
        .change_role(&admin, id, Role::Collaborator)
        .await
        .expect("promote");

    let again = harness
        .service
        .provision_profile(id, "ada@example.com", Some("Someone Else"))
        .await
        .expect("provision again");

    assert_eq!(first.role(), Role::Member);
    assert_eq!(again.role(), Role::Collaborator);
    assert_eq!(again.display_name(), "Ada");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_provisioning_yields_one_profile(harness: Harness) {
    let id = ProfileId::new();
    let service = Arc::new(harness.service);
    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let worker = Arc::clone(&service);
            tokio::spawn(async move { worker.provision_profile(id, "a@x.io", None).await })
        })
        .collect();
    for attempt in attempts {
        attempt.await.expect("join").expect("provision");
    }

    let rows = harness.store.rows(Collection::Profiles).expect("rows");
    assert_eq!(rows.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolve_principal_reflects_role_changes(harness: Harness) {
    let admin = seed_profile(&harness.store, "Root", Role::Admin).await;
    let member = seed_profile(&harness.store, "Mia", Role::Member).await;

    harness
        .service
        .change_role(&admin, member.id(), Role::Admin)
        .await
        .expect("promote");
    let resolved = harness
        .service
        .resolve_principal(member.id())
        .await
        .expect("resolve");

    assert_eq!(resolved.role(), Role::Admin);
    assert_eq!(resolved.display_name(), "Mia");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_principal_is_not_found(harness: Harness) {
    let err = harness
        .service
        .resolve_principal(ProfileId::new())
        .await
        .expect_err("missing profile");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_admins_cannot_change_roles(harness: Harness) {
    let collaborator = seed_profile(&harness.store, "Cole", Role::Collaborator).await;
    let member = seed_profile(&harness.store, "Mia", Role::Member).await;

    let err = harness
        .service
        .change_role(&collaborator, member.id(), Role::Admin)
        .await
        .expect_err("denied");

    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn self_service_update_persists(harness: Harness) {
    let member = seed_profile(&harness.store, "Mia", Role::Member).await;

    let updated = harness
        .service
        .update_own_profile(
            &member,
            ProfileUpdate::new()
                .with_phone("+44 20 7946 0000")
                .with_present(true),
        )
        .await
        .expect("update");

    assert_eq!(updated.phone(), Some("+44 20 7946 0000"));
    assert!(updated.present());
    assert_eq!(updated.role(), Role::Member);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_user_removes_owned_tasks_and_assignments(harness: Harness) {
    let admin = seed_profile(&harness.store, "Root", Role::Admin).await;
    let member = seed_profile(&harness.store, "Mia", Role::Member).await;
    let member_id = member.id().to_string();
    let tasks = harness
        .store
        .insert(
            Collection::Tasks,
            vec![
                record(
                    serde_json::json!({"title": "Owned", "primary_poc": member_id}),
                ),
                record(
                    serde_json::json!({"title": "Other", "primary_poc": admin.id().to_string()}),
                ),
            ],
        )
        .await
        .expect("tasks");
    let other_task = tasks.get(1).and_then(|row| row.get("id")).cloned().expect("id");
    harness
        .store
        .insert(
            Collection::TaskAssignments,
            vec![record(serde_json::json!({
                "task_id": other_task, "user_id": member_id, "is_primary_poc": false
            }))],
        )
        .await
        .expect("assignment");

    harness
        .service
        .delete_user(&admin, member.id())
        .await
        .expect("delete");

    let remaining = harness
        .store
        .select(Collection::Tasks, &Query::new())
        .await
        .expect("tasks");
    assert_eq!(remaining.len(), 1);
    assert!(
        harness
            .store
            .rows(Collection::TaskAssignments)
            .expect("rows")
            .is_empty()
    );
    let err = harness
        .service
        .delete_user(&admin, member.id())
        .await
        .expect_err("already gone");
    assert!(matches!(err, ProfileServiceError::NotFound(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn roster_is_ordered_by_display_name(harness: Harness) {
    for name in ["zed", "Amy", "bob"] {
        seed_profile(&harness.store, name, Role::Member).await;
    }

    let names: Vec<_> = harness
        .service
        .roster()
        .await
        .expect("roster")
        .iter()
        .map(|profile| profile.display_name().to_owned())
        .collect();

    assert_eq!(names, ["Amy", "bob", "zed"]);
}

mock! {
    Profiles {}

    #[async_trait]
    impl ProfileRepository for Profiles {
        async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>>;
        async fn list_all(&self) -> ProfileRepositoryResult<Vec<Profile>>;
        async fn provision(&self, profile: &Profile) -> ProfileRepositoryResult<bool>;
        async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()>;
        async fn delete(&self, id: ProfileId) -> ProfileRepositoryResult<()>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn persistence_failures_are_upstream_errors() {
    let mut repository = MockProfiles::new();
    repository.expect_find_by_id().returning(|_| {
        Err(ProfileRepositoryError::persistence(std::io::Error::other(
            "connection reset",
        )))
    });
    let service = ProfileService::new(Arc::new(repository), manual_clock());

    let err = service
        .resolve_profile(ProfileId::new())
        .await
        .expect_err("upstream failure");

    assert_eq!(err.kind(), ErrorKind::Upstream);
}
