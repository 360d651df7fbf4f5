//! Given steps for workspace BDD scenarios.

use eyre::WrapErr;
use rstest_bdd_macros::given;
use teamdesk::identity::domain::Role;
use teamdesk::task::services::CreateTaskRequest;

use super::world::{WorkspaceWorld, run_async};

#[given(r#"an admin named "{name}""#)]
fn admin_named(world: &mut WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    world.add_person(&name, Role::Admin)
}

#[given(r#"a collaborator named "{name}""#)]
fn collaborator_named(world: &mut WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    world.add_person(&name, Role::Collaborator)
}

#[given(r#"a member named "{name}""#)]
fn member_named(world: &mut WorkspaceWorld, name: String) -> Result<(), eyre::Report> {
    world.add_person(&name, Role::Member)
}

#[given(r#""{creator}" created the task "{title}" with "{poc}" as primary POC"#)]
fn task_created(
    world: &mut WorkspaceWorld,
    creator: String,
    title: String,
    poc: String,
) -> Result<(), eyre::Report> {
    let requester = world.person(&creator)?;
    let contact = world.person(&poc)?;
    let task = run_async(
        world
            .tasks
            .create_task(CreateTaskRequest::new(title, contact.id()), &requester),
    )
    .wrap_err("create task in scenario setup")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#""{author}" commented "{text}""#)]
fn commented(world: &mut WorkspaceWorld, author: String, text: String) -> Result<(), eyre::Report> {
    let writer = world.person(&author)?;
    let task_id = world.current_task()?.id();
    let comment = run_async(world.comments.post_comment(task_id, &text, &writer))
        .wrap_err("post comment in scenario setup")?;
    world.comment = Some(comment);
    Ok(())
}
