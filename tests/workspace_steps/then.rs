//! Then steps for workspace BDD scenarios.

use rstest_bdd_macros::then;
use teamdesk::attendance::domain::AttendanceStatus;
use teamdesk::error::ErrorKind;
use teamdesk::notice::domain::{Notice, NoticeFilter};
use teamdesk::task::domain::TaskStatus;

use super::world::{WorkspaceWorld, run_async};

fn expect_error(world: &WorkspaceWorld, expected: ErrorKind) -> Result<(), eyre::Report> {
    match world.last_error {
        Some(kind) if kind == expected => Ok(()),
        other => Err(eyre::eyre!("expected {expected} error, got {other:?}")),
    }
}

#[then("the request is denied")]
fn request_denied(world: &WorkspaceWorld) -> Result<(), eyre::Report> {
    expect_error(world, ErrorKind::PermissionDenied)
}

#[then("the request fails validation")]
fn request_invalid(world: &WorkspaceWorld) -> Result<(), eyre::Report> {
    expect_error(world, ErrorKind::Validation)
}

#[then("the request succeeds")]
fn request_succeeds(world: &WorkspaceWorld) -> Result<(), eyre::Report> {
    match world.last_error {
        None => Ok(()),
        Some(kind) => Err(eyre::eyre!("expected success, got {kind} error")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &WorkspaceWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task = run_async(world.tasks.get_task(world.current_task()?.id()))?;
    if task.current_status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            task.current_status()
        ));
    }
    Ok(())
}

#[then(r#"the task title is "{title}""#)]
fn task_title_is(world: &WorkspaceWorld, title: String) -> Result<(), eyre::Report> {
    let task = run_async(world.tasks.get_task(world.current_task()?.id()))?;
    if task.title() != title {
        return Err(eyre::eyre!("expected title {title:?}, found {:?}", task.title()));
    }
    Ok(())
}

#[then(r#""{name}" holds the only primary assignment"#)]
fn only_primary(world: &WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.person(&name)?.id();
    let task_id = world.current_task()?.id();
    let task = run_async(world.tasks.get_task(task_id))?;
    let primaries: Vec<_> = run_async(world.tasks.list_assignments(task_id))?
        .into_iter()
        .filter(|row| row.is_primary_poc())
        .map(|row| row.user_id())
        .collect();
    if primaries != [expected] || task.primary_poc() != Some(expected) {
        return Err(eyre::eyre!(
            "expected {name} as sole primary POC, found rows {primaries:?} and task POC {:?}",
            task.primary_poc()
        ));
    }
    Ok(())
}

#[then(r#"the comment reads "{text}""#)]
fn comment_reads(world: &WorkspaceWorld, text: String) -> Result<(), eyre::Report> {
    let comment = run_async(world.comments.get_comment(world.current_comment()?.id()))?;
    if comment.text() != text {
        return Err(eyre::eyre!("expected comment {text:?}, found {:?}", comment.text()));
    }
    Ok(())
}

#[then("the comment is marked edited")]
fn comment_marked_edited(world: &WorkspaceWorld) -> Result<(), eyre::Report> {
    if !world.current_comment()?.is_edited() {
        return Err(eyre::eyre!("comment is not marked edited"));
    }
    Ok(())
}

#[then("the task has no comments")]
fn task_has_no_comments(world: &WorkspaceWorld) -> Result<(), eyre::Report> {
    let comments = run_async(world.comments.list_comments(world.current_task()?.id()))?;
    if !comments.is_empty() {
        return Err(eyre::eyre!("expected no comments, found {}", comments.len()));
    }
    Ok(())
}

#[then(r#""{name}" is "{status}" today"#)]
fn attendance_today(world: &WorkspaceWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let person = world.person(&name)?;
    let expected = AttendanceStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid attendance status in scenario: {err}"))?;
    let actual = run_async(world.attendance.status_today(&person))?;
    if actual != expected {
        return Err(eyre::eyre!("expected {expected}, found {actual}"));
    }
    Ok(())
}

#[then(r#""{name}" has {count:usize} attendance record"#)]
fn attendance_record_count(
    world: &WorkspaceWorld,
    name: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let person = world.person(&name)?;
    let rows = run_async(world.attendance.recent_history(&person, person.id()))?;
    if rows.len() != count {
        return Err(eyre::eyre!("expected {count} records, found {}", rows.len()));
    }
    Ok(())
}

#[then(r#"the notice board lists "{titles}""#)]
fn notice_board_lists(world: &WorkspaceWorld, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = titles.split(", ").collect();
    let notices = run_async(world.notices.list_notices(NoticeFilter::all()))?;
    let actual: Vec<&str> = notices.iter().map(Notice::title).collect();
    if actual != expected {
        return Err(eyre::eyre!("expected {expected:?}, found {actual:?}"));
    }
    Ok(())
}
