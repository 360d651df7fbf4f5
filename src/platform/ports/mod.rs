//! Port contracts for the hosted data platform.
//!
//! Ports define infrastructure-agnostic interfaces consumed by the
//! application services.

pub mod changes;
pub mod identity;
pub mod storage;
pub mod store;

pub use changes::ChangeFeed;
pub use identity::{
    AuthEvent, AuthUser, Credentials, IdentityError, IdentityProvider, IdentityResult, Session,
    SignUpOutcome,
};
pub use storage::{ObjectStorage, StorageError, StorageResult, StoredObject};
pub use store::{DataStore, StoreError, StoreResult};
