//! In-memory platform adapters for tests and local development.
//!
//! Together these adapters stand in for the hosted platform: a data store
//! with unique keys, triggers, procedures and a change feed, an identity
//! provider with a single session, and a bucketed object store.

mod identity;
mod procedures;
mod storage;
mod store;

pub use identity::{InMemoryIdentityProvider, MIN_PASSWORD_LENGTH};
pub use storage::InMemoryObjectStorage;
pub use store::{InMemoryDataStore, InsertTrigger};
