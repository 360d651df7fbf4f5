//! When steps for workspace BDD scenarios.

use chrono::Duration;
use rstest_bdd_macros::when;
use teamdesk::attendance::domain::{AttendanceStatus, MarkAttendanceRequest};
use teamdesk::notice::domain::NewNotice;
use teamdesk::task::domain::{TaskPatch, TaskStatus};

use super::world::{WorkspaceWorld, run_async};

#[when(r#""{name}" sets the task status to "{status}""#)]
fn set_status(world: &mut WorkspaceWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    patch_task(world, &name, TaskPatch::new().with_status(parsed))
}

#[when(r#""{name}" renames the task to "{title}""#)]
fn rename_task(world: &mut WorkspaceWorld, name: String, title: String) -> Result<(), eyre::Report> {
    patch_task(world, &name, TaskPatch::new().with_title(title))
}

fn patch_task(world: &mut WorkspaceWorld, name: &str, patch: TaskPatch) -> Result<(), eyre::Report> {
    let requester = world.person(name)?;
    let task_id = world.current_task()?.id();
    match run_async(world.tasks.update_task(task_id, patch, &requester)) {
        Ok(task) => {
            world.task = Some(task);
            world.last_error = None;
        }
        Err(err) => world.last_error = Some(err.kind()),
    }
    Ok(())
}

#[when(r#""{name}" makes "{poc}" the primary POC"#)]
fn make_primary(world: &mut WorkspaceWorld, name: String, poc: String) -> Result<(), eyre::Report> {
    let requester = world.person(&name)?;
    let contact = world.person(&poc)?;
    let task_id = world.current_task()?.id();
    world.last_error = run_async(world.tasks.change_primary_poc(task_id, contact.id(), &requester))
        .err()
        .map(|err| err.kind());
    Ok(())
}

#[when(r#""{name}" removes the primary assignment"#)]
fn remove_primary(world: &mut WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    let requester = world.person(&name)?;
    let task_id = world.current_task()?.id();
    let rows = run_async(world.tasks.list_assignments(task_id))?;
    let primary = rows
        .iter()
        .find(|row| row.is_primary_poc())
        .ok_or_else(|| eyre::eyre!("task has no primary assignment"))?;
    world.last_error = run_async(world.tasks.remove_member(task_id, primary.id(), &requester))
        .err()
        .map(|err| err.kind());
    Ok(())
}

#[when("{seconds:i64} seconds pass")]
fn seconds_pass(world: &mut WorkspaceWorld, seconds: i64) {
    world.clock.advance(Duration::seconds(seconds));
}

#[when(r#""{name}" edits the comment to "{text}""#)]
fn edit_comment(world: &mut WorkspaceWorld, name: String, text: String) -> Result<(), eyre::Report> {
    let requester = world.person(&name)?;
    let comment_id = world.current_comment()?.id();
    match run_async(world.comments.edit_comment(comment_id, &text, &requester)) {
        Ok(comment) => {
            world.comment = Some(comment);
            world.last_error = None;
        }
        Err(err) => world.last_error = Some(err.kind()),
    }
    Ok(())
}

#[when(r#""{name}" deletes the comment"#)]
fn delete_comment(world: &mut WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    let requester = world.person(&name)?;
    let comment_id = world.current_comment()?.id();
    world.last_error = run_async(world.comments.delete_comment(comment_id, &requester))
        .err()
        .map(|err| err.kind());
    Ok(())
}

#[when(r#""{name}" marks attendance as "{status}""#)]
fn mark_attendance(
    world: &mut WorkspaceWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let requester = world.person(&name)?;
    let parsed = AttendanceStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid attendance status in scenario: {err}"))?;
    run_async(
        world
            .attendance
            .mark_attendance(&requester, MarkAttendanceRequest::new(requester.id(), parsed)),
    )?;
    Ok(())
}

#[when(r#""{name}" publishes the notice "{title}""#)]
fn publish_notice(world: &mut WorkspaceWorld, name: String, title: String) -> Result<(), eyre::Report> {
    publish(world, &name, NewNotice::new(title, "Details inside"))
}

#[when(r#""{name}" publishes the pinned notice "{title}""#)]
fn publish_pinned_notice(
    world: &mut WorkspaceWorld,
    name: String,
    title: String,
) -> Result<(), eyre::Report> {
    publish(world, &name, NewNotice::new(title, "Details inside").pinned())
}

fn publish(world: &mut WorkspaceWorld, name: &str, notice: NewNotice) -> Result<(), eyre::Report> {
    let author = world.person(name)?;
    world.last_error = run_async(world.notices.create_notice(notice, &[], None, &author))
        .err()
        .map(|err| err.kind());
    Ok(())
}
