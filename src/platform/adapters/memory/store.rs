//! In-memory data store with unique keys, insert triggers and a change feed.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::procedures;
use crate::platform::{
    domain::{
        ChangeEvent, ChangeKind, Collection, ConflictAction, GeneratedId, OnConflict, Procedure,
        Query, Record,
    },
    ports::{ChangeFeed, DataStore, StoreError, StoreResult},
};

/// Capacity of the change feed broadcast channel.
const CHANGE_FEED_CAPACITY: usize = 256;

/// Platform-side trigger run after each row inserted into a collection.
///
/// The trigger returns rows to insert as part of the same write. A failing
/// trigger write aborts the whole insert.
pub type InsertTrigger = Arc<dyn Fn(&Record) -> Vec<(Collection, Record)> + Send + Sync>;

/// Thread-safe in-memory data store.
#[derive(Clone)]
pub struct InMemoryDataStore {
    state: Arc<RwLock<StoreState>>,
    changes: broadcast::Sender<ChangeEvent>,
}

#[derive(Default)]
pub(super) struct StoreState {
    pub(super) tables: HashMap<Collection, Vec<Record>>,
    next_serial: HashMap<Collection, i64>,
    triggers: Vec<(Collection, InsertTrigger)>,
}

impl fmt::Debug for InMemoryDataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryDataStore")
            .field("subscribers", &self.changes.receiver_count())
            .finish_non_exhaustive()
    }
}

impl Default for InMemoryDataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDataStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            changes,
        }
    }

    /// Registers a trigger run after every insert into `collection`.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn add_insert_trigger(
        &self,
        collection: Collection,
        trigger: InsertTrigger,
    ) -> StoreResult<()> {
        let mut state = self.write_state()?;
        state.triggers.push((collection, trigger));
        Ok(())
    }

    /// Returns a copy of every row in a collection, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn rows(&self, collection: Collection) -> StoreResult<Vec<Record>> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::backend(std::io::Error::other(err.to_string())))?;
        Ok(state.tables.get(&collection).cloned().unwrap_or_default())
    }

    fn write_state(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| StoreError::backend(std::io::Error::other(err.to_string())))
    }

    /// Runs a mutation atomically: on error the tables are restored and no
    /// change events are published.
    fn mutate<T>(
        &self,
        operation: impl FnOnce(&mut StoreState, &mut Vec<ChangeEvent>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut events = Vec::new();
        let result = {
            let mut state = self.write_state()?;
            let backup = state.tables.clone();
            let outcome = operation(&mut state, &mut events);
            if outcome.is_err() {
                state.tables = backup;
            }
            outcome
        };
        if result.is_ok() {
            self.publish(events);
        }
        result
    }

    fn publish(&self, events: Vec<ChangeEvent>) {
        for event in events {
            if self.changes.send(event).is_err() {
                // No live subscribers.
                break;
            }
        }
    }
}

impl StoreState {
    fn table(&self, collection: Collection) -> &[Record] {
        self.tables.get(&collection).map_or(&[], Vec::as_slice)
    }

    fn assign_id(&mut self, collection: Collection, record: &mut Record) {
        match collection.generated_id() {
            GeneratedId::Uuid => {
                if record.get("id").is_none_or(Value::is_null) {
                    record.insert("id".to_owned(), Value::String(Uuid::new_v4().to_string()));
                }
            }
            GeneratedId::Serial => {
                let counter = self.next_serial.entry(collection).or_insert(0);
                let explicit = record.get("id").and_then(Value::as_i64);
                *counter = explicit.map_or(*counter + 1, |id| (*counter).max(id));
                if explicit.is_none() {
                    record.insert("id".to_owned(), Value::from(*counter));
                }
            }
            GeneratedId::None => {}
        }
    }

    /// Finds the first unique key on which `candidate` collides with a row
    /// other than the one at `skip`.
    fn find_collision(
        &self,
        collection: Collection,
        candidate: &Record,
        skip: Option<usize>,
    ) -> Option<String> {
        let rows = self.table(collection);
        collection.unique_keys().iter().find_map(|columns| {
            let key = key_of(candidate, columns)?;
            rows.iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != skip)
                .any(|(_, row)| key_of(row, columns).as_ref() == Some(&key))
                .then(|| collection.constraint_name(columns))
        })
    }

    pub(super) fn insert_rows(
        &mut self,
        collection: Collection,
        records: Vec<Record>,
        events: &mut Vec<ChangeEvent>,
    ) -> StoreResult<Vec<Record>> {
        let mut stored = Vec::with_capacity(records.len());
        for mut record in records {
            self.assign_id(collection, &mut record);
            if let Some(constraint) = self.find_collision(collection, &record, None) {
                return Err(StoreError::UniqueViolation {
                    collection,
                    constraint,
                });
            }
            self.tables
                .entry(collection)
                .or_default()
                .push(record.clone());
            events.push(ChangeEvent::new(
                collection,
                ChangeKind::Insert,
                record.clone(),
            ));
            self.run_triggers(collection, &record, events)?;
            stored.push(record);
        }
        Ok(stored)
    }

    fn run_triggers(
        &mut self,
        collection: Collection,
        record: &Record,
        events: &mut Vec<ChangeEvent>,
    ) -> StoreResult<()> {
        let outputs: Vec<(Collection, Record)> = self
            .triggers
            .iter()
            .filter(|(target, _)| *target == collection)
            .flat_map(|(_, trigger)| trigger(record))
            .collect();
        for (target, row) in outputs {
            self.insert_rows(target, vec![row], events)?;
        }
        Ok(())
    }

    pub(super) fn update_rows(
        &mut self,
        collection: Collection,
        query: &Query,
        patch: &Record,
        events: &mut Vec<ChangeEvent>,
    ) -> StoreResult<Vec<Record>> {
        let indices: Vec<usize> = self
            .table(collection)
            .iter()
            .enumerate()
            .filter(|(_, row)| query.matches(row))
            .map(|(index, _)| index)
            .collect();

        let mut updated = Vec::with_capacity(indices.len());
        for index in indices {
            let mut row = self
                .table(collection)
                .get(index)
                .cloned()
                .unwrap_or_default();
            row.extend(patch.clone());
            if let Some(constraint) = self.find_collision(collection, &row, Some(index)) {
                return Err(StoreError::UniqueViolation {
                    collection,
                    constraint,
                });
            }
            if let Some(slot) = self
                .tables
                .get_mut(&collection)
                .and_then(|rows| rows.get_mut(index))
            {
                *slot = row.clone();
            }
            events.push(ChangeEvent::new(collection, ChangeKind::Update, row.clone()));
            updated.push(row);
        }
        Ok(updated)
    }

    fn delete_rows(
        &mut self,
        collection: Collection,
        query: &Query,
        events: &mut Vec<ChangeEvent>,
    ) -> usize {
        let Some(rows) = self.tables.get_mut(&collection) else {
            return 0;
        };
        let (removed, kept): (Vec<Record>, Vec<Record>) =
            rows.drain(..).partition(|row| query.matches(row));
        *rows = kept;
        let count = removed.len();
        events.extend(
            removed
                .into_iter()
                .map(|row| ChangeEvent::new(collection, ChangeKind::Delete, row)),
        );
        count
    }

    pub(super) fn upsert_row(
        &mut self,
        collection: Collection,
        record: Record,
        conflict: &OnConflict,
        events: &mut Vec<ChangeEvent>,
    ) -> StoreResult<Option<Record>> {
        let columns: Vec<&str> = conflict.columns.iter().map(String::as_str).collect();
        let existing = key_of(&record, &columns).and_then(|key| {
            self.table(collection)
                .iter()
                .position(|row| key_of(row, &columns).as_ref() == Some(&key))
        });

        let Some(index) = existing else {
            let mut stored = self.insert_rows(collection, vec![record], events)?;
            return Ok(stored.pop());
        };

        match conflict.action {
            ConflictAction::Ignore => Ok(None),
            ConflictAction::Update => {
                let query = key_query(&record, &columns);
                let mut updated = self.update_rows(collection, &query, &record, events)?;
                debug_assert_eq!(updated.len(), 1, "conflict key matched row {index}");
                Ok(updated.pop())
            }
        }
    }
}

/// Extracts the values of `columns`; `None` when any is missing or null,
/// since a null never collides on a unique key.
fn key_of(record: &Record, columns: &[&str]) -> Option<Vec<Value>> {
    columns
        .iter()
        .map(|column| record.get(*column).filter(|value| !value.is_null()).cloned())
        .collect()
}

fn key_query(record: &Record, columns: &[&str]) -> Query {
    columns.iter().fold(Query::new(), |query, column| {
        query.eq(*column, record.get(*column).cloned().unwrap_or(Value::Null))
    })
}

#[async_trait]
impl DataStore for InMemoryDataStore {
    async fn select(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Record>> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::backend(std::io::Error::other(err.to_string())))?;
        Ok(query.apply(state.table(collection)))
    }

    async fn insert(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> StoreResult<Vec<Record>> {
        self.mutate(|state, events| state.insert_rows(collection, records, events))
    }

    async fn update(
        &self,
        collection: Collection,
        query: &Query,
        patch: Record,
    ) -> StoreResult<Vec<Record>> {
        self.mutate(|state, events| state.update_rows(collection, query, &patch, events))
    }

    async fn delete(&self, collection: Collection, query: &Query) -> StoreResult<usize> {
        self.mutate(|state, events| Ok(state.delete_rows(collection, query, events)))
    }

    async fn upsert(
        &self,
        collection: Collection,
        record: Record,
        conflict: &OnConflict,
    ) -> StoreResult<Option<Record>> {
        self.mutate(|state, events| state.upsert_row(collection, record, conflict, events))
    }

    async fn rpc(&self, procedure: Procedure, params: Value) -> StoreResult<Value> {
        self.mutate(|state, events| procedures::call(state, procedure, &params, events))
    }
}

impl ChangeFeed for InMemoryDataStore {
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }
}
