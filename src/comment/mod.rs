//! Task comments for teamdesk.
//!
//! Anyone on the roster may comment on a task. Authors may edit their own
//! comment for a short window after posting (five minutes unless
//! configured otherwise); only admins delete. Comment text can reference
//! roster members with `@[name](id)` mentions, which are parsed, rendered
//! and suggested by [`domain::mention`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services and the realtime feed in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
