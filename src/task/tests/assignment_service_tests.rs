//! Tests for assignment merging, membership and primary POC transfer.

use std::sync::Arc;

use rstest::rstest;
use serde_json::{Value, json};

use super::{Harness, harness};
use crate::error::ErrorKind;
use crate::platform::domain::{Collection, Record};
use crate::task::{
    domain::{AssignmentId, TaskDomainError},
    services::{CreateTaskRequest, TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rerunning_merge_never_duplicates_rows(harness: Harness) {
    let cast = harness.cast().await;
    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new("Audit", cast.member.id()).with_members([cast.other.id()]),
            &cast.admin,
        )
        .await
        .expect("create");

    let rows = harness
        .service
        .merge_assignments(
            task.id(),
            cast.member.id(),
            &[cast.other.id(), cast.collaborator.id()],
            &cast.admin,
        )
        .await
        .expect("merge");
    let again = harness
        .service
        .merge_assignments(
            task.id(),
            cast.member.id(),
            &[cast.other.id(), cast.collaborator.id()],
            &cast.admin,
        )
        .await
        .expect("merge again");

    assert_eq!(rows.len(), 3);
    assert_eq!(again.len(), 3);
    assert_eq!(
        harness
            .store
            .rows(Collection::TaskAssignments)
            .expect("rows")
            .len(),
        3
    );
    assert_eq!(again.iter().filter(|row| row.is_primary_poc()).count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_member_is_idempotent(harness: Harness) {
    let cast = harness.cast().await;
    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new("Audit", cast.member.id()),
            &cast.admin,
        )
        .await
        .expect("create");

    harness
        .service
        .add_member(task.id(), cast.other.id(), &cast.admin)
        .await
        .expect("add");
    let rows = harness
        .service
        .add_member(task.id(), cast.other.id(), &cast.admin)
        .await
        .expect("add again");

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|row| row.user_id() == cast.other.id()
        && row.user_name() == Some("Otto Other")
        && !row.is_primary_poc()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn primary_row_cannot_be_removed(harness: Harness) {
    let cast = harness.cast().await;
    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new("Audit", cast.member.id()).with_members([cast.other.id()]),
            &cast.admin,
        )
        .await
        .expect("create");
    let rows = harness
        .service
        .list_assignments(task.id())
        .await
        .expect("rows");
    let primary = rows.first().map(|row| row.id()).expect("primary row");
    let secondary = rows.get(1).map(|row| row.id()).expect("member row");

    let err = harness
        .service
        .remove_member(task.id(), primary, &cast.admin)
        .await
        .expect_err("primary row is protected");
    harness
        .service
        .remove_member(task.id(), secondary, &cast.admin)
        .await
        .expect("remove member");

    assert!(matches!(
        err,
        TaskServiceError::Domain(TaskDomainError::PrimaryPocRemoval(id)) if id == primary
    ));
    assert_eq!(err.kind(), ErrorKind::Validation);
    let remaining = harness
        .service
        .list_assignments(task.id())
        .await
        .expect("rows");
    assert_eq!(remaining.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_unknown_row_is_not_found(harness: Harness) {
    let cast = harness.cast().await;
    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new("Audit", cast.member.id()),
            &cast.admin,
        )
        .await
        .expect("create");

    let err = harness
        .service
        .remove_member(task.id(), AssignmentId::new(), &cast.admin)
        .await
        .expect_err("unknown row");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_primary_poc_keeps_one_primary_row(harness: Harness) {
    let cast = harness.cast().await;
    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new("Audit", cast.member.id()),
            &cast.admin,
        )
        .await
        .expect("create");

    let denied = harness
        .service
        .change_primary_poc(task.id(), cast.other.id(), &cast.collaborator)
        .await
        .expect_err("collaborators cannot transfer");
    let moved = harness
        .service
        .change_primary_poc(task.id(), cast.other.id(), &cast.admin)
        .await
        .expect("transfer");
    let rows = harness
        .service
        .list_assignments(task.id())
        .await
        .expect("rows");

    assert_eq!(denied.kind(), ErrorKind::PermissionDenied);
    assert_eq!(moved.primary_poc(), Some(cast.other.id()));
    assert_eq!(moved.primary_poc_name(), Some("Otto Other"));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.iter().filter(|row| row.is_primary_poc()).count(), 1);
    assert_eq!(rows.first().map(|row| row.user_id()), Some(cast.other.id()));
}

fn assignment_row(task_id: Option<&Value>, user_id: Value, primary: bool) -> Record {
    let mut row = Record::new();
    row.insert("task_id".to_owned(), task_id.cloned().unwrap_or(Value::Null));
    row.insert("user_id".to_owned(), user_id);
    row.insert("is_primary_poc".to_owned(), Value::Bool(primary));
    row
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_keeps_primary_row_written_by_task_trigger(harness: Harness) {
    let cast = harness.cast().await;
    harness
        .store
        .add_insert_trigger(
            Collection::Tasks,
            Arc::new(|task| {
                let poc = task.get("primary_poc").cloned().unwrap_or(Value::Null);
                vec![(
                    Collection::TaskAssignments,
                    assignment_row(task.get("id"), poc, true),
                )]
            }),
        )
        .expect("register trigger");

    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new("Audit", cast.member.id())
                .with_members([cast.other.id(), cast.member.id()]),
            &cast.admin,
        )
        .await
        .expect("create");

    let rows = harness
        .service
        .list_assignments(task.id())
        .await
        .expect("rows");
    assert_eq!(rows.len(), 2);
    for member in [cast.member.id(), cast.other.id()] {
        assert_eq!(rows.iter().filter(|row| row.user_id() == member).count(), 1);
    }
    assert_eq!(rows.iter().filter(|row| row.is_primary_poc()).count(), 1);
    assert_eq!(rows.first().map(|row| row.user_id()), Some(cast.member.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn merge_skips_row_inserted_concurrently(harness: Harness) {
    let cast = harness.cast().await;
    let poc = json!(cast.member.id());
    let racer = json!(cast.other.id());
    harness
        .store
        .add_insert_trigger(
            Collection::TaskAssignments,
            Arc::new(move |row| {
                if row.get("user_id") != Some(&poc) {
                    return Vec::new();
                }
                vec![(
                    Collection::TaskAssignments,
                    assignment_row(row.get("task_id"), racer.clone(), false),
                )]
            }),
        )
        .expect("register trigger");

    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new("Audit", cast.member.id()).with_members([cast.other.id()]),
            &cast.admin,
        )
        .await
        .expect("duplicate member row is skipped");

    let rows = harness
        .store
        .rows(Collection::TaskAssignments)
        .expect("rows");
    assert_eq!(rows.len(), 2);
    let listed = harness
        .service
        .list_assignments(task.id())
        .await
        .expect("rows");
    assert_eq!(
        listed.iter().filter(|row| row.user_id() == cast.other.id()).count(),
        1
    );
    assert_eq!(listed.iter().filter(|row| row.is_primary_poc()).count(), 1);
}
