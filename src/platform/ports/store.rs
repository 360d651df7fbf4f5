//! Data access port: collection-scoped reads and writes plus named procedures.

use crate::platform::domain::{Collection, OnConflict, Procedure, Query, Record};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for data store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Generic read/write contract against named collections.
///
/// Every call is an independent round trip; there is no cross-call
/// transaction. Multi-step callers must be safe to re-run.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Returns rows matching the query, ordered and limited as requested.
    async fn select(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Record>>;

    /// Inserts all records or none of them and returns the stored rows.
    ///
    /// Records missing a generated `id` receive one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] when any record collides with
    /// an existing row or with another record in the same batch.
    async fn insert(&self, collection: Collection, records: Vec<Record>)
    -> StoreResult<Vec<Record>>;

    /// Applies `patch` to every row matching the query's filters and returns
    /// the updated rows.
    async fn update(
        &self,
        collection: Collection,
        query: &Query,
        patch: Record,
    ) -> StoreResult<Vec<Record>>;

    /// Deletes every row matching the query's filters and returns the count.
    async fn delete(&self, collection: Collection, query: &Query) -> StoreResult<usize>;

    /// Inserts `record` or resolves a conflict on the given key.
    ///
    /// Returns the stored row, or `None` when the conflict was ignored.
    async fn upsert(
        &self,
        collection: Collection,
        record: Record,
        conflict: &OnConflict,
    ) -> StoreResult<Option<Record>>;

    /// Invokes a named remote procedure with named parameters.
    async fn rpc(&self, procedure: Procedure, params: Value) -> StoreResult<Value>;
}

/// Errors returned by data store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A write collided with a unique constraint.
    #[error("unique constraint {constraint} violated on {collection}")]
    UniqueViolation {
        /// Collection written to.
        collection: Collection,
        /// Constraint name.
        constraint: String,
    },

    /// The procedure is not registered on the platform.
    #[error("unknown procedure: {0}")]
    UnknownProcedure(String),

    /// Procedure parameters were missing or malformed.
    #[error("invalid parameters for {procedure}: {reason}")]
    InvalidParameters {
        /// Procedure name.
        procedure: String,
        /// Description of the problem.
        reason: String,
    },

    /// A record could not be encoded or decoded.
    #[error("invalid record for {collection}: {reason}")]
    InvalidRecord {
        /// Collection involved.
        collection: Collection,
        /// Description of the problem.
        reason: String,
    },

    /// Transport or backend failure.
    #[error("data store backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Builds an [`StoreError::InvalidRecord`] from any displayable cause.
    pub fn invalid_record(collection: Collection, reason: impl ToString) -> Self {
        Self::InvalidRecord {
            collection,
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for unique-key collisions.
    #[must_use]
    pub const fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}
