//! Central authorization policy.
//!
//! Every service asks [`authorize`] before mutating anything. The policy is
//! a pure function of the requester, the action and the facts about the
//! target resource the caller has just read from the store; it performs no
//! I/O of its own.
//!
//! Task edits are additionally gated per field: see [`TaskEditScope`].

mod action;
mod policy;

pub use action::{Action, Resource, TaskAccess};
pub use policy::{AccessDenied, DenialReason, TaskEditScope, authorize, task_edit_scope};

#[cfg(test)]
mod tests;
