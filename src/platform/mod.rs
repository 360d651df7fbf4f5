//! Hosted data platform boundary for teamdesk.
//!
//! Persistence, authentication, object storage and realtime change
//! notification all live on an external platform. This module models that
//! platform as four ports and ships adapters for them:
//!
//! - Domain types in [`domain`]: collections, queries, records, change events
//! - Port contracts in [`ports`]: [`ports::DataStore`], [`ports::ChangeFeed`],
//!   [`ports::IdentityProvider`], [`ports::ObjectStorage`]
//! - Adapter implementations in [`adapters`]: in-memory platform and a
//!   `PostgreSQL` data store

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
