//! Identity and role resolution for teamdesk.
//!
//! Maps authenticated principals from the identity provider onto roster
//! profiles and roles. Sign-up provisions a `member` profile idempotently,
//! roles are re-resolved on every request and never cached, and the roster
//! is maintained through self-service updates plus admin-only role changes
//! and deletions.
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
