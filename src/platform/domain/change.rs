//! Realtime change notifications emitted by the data platform.

use super::{Collection, Record};
use serde_json::Value;

/// Kind of mutation that produced a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A row was inserted.
    Insert,
    /// A row was updated.
    Update,
    /// A row was deleted.
    Delete,
}

/// A single row-level change on a collection.
///
/// For deletions `record` holds the row as it was before removal.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// Collection the row belongs to.
    pub collection: Collection,
    /// Mutation kind.
    pub kind: ChangeKind,
    /// Affected row.
    pub record: Record,
}

impl ChangeEvent {
    /// Creates a change event.
    #[must_use]
    pub const fn new(collection: Collection, kind: ChangeKind, record: Record) -> Self {
        Self {
            collection,
            kind,
            record,
        }
    }

    /// Returns `true` when the event is on `collection` and the row's
    /// `column` equals `value`.
    #[must_use]
    pub fn concerns(&self, collection: Collection, column: &str, value: &Value) -> bool {
        self.collection == collection && self.record.get(column) == Some(value)
    }
}
