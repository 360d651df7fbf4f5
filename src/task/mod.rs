//! Task and assignment management for teamdesk.
//!
//! Tasks are created by admins and collaborators with one primary POC and
//! any number of additional members. Assignment rows are merged
//! idempotently, edits are gated per field by the requester's edit scope,
//! and only admins delete tasks, manage members or transfer the primary
//! POC. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
