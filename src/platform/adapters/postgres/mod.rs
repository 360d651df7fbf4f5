//! `PostgreSQL` implementation of the [`DataStore`] port using Diesel.
//!
//! Tables mirror the collection names one-to-one and procedures are SQL
//! functions taking a single `jsonb` argument; both ship in `migrations/`.

pub(crate) mod sql;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_query;
use diesel::sql_types::Jsonb;
use serde_json::Value;

use crate::platform::{
    domain::{Collection, OnConflict, Procedure, Query, Record},
    ports::{DataStore, StoreError, StoreResult},
};
use sql::Statement;

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(QueryableByName)]
struct JsonRow {
    #[diesel(sql_type = Jsonb)]
    record: Value,
}

/// `PostgreSQL` implementation of [`DataStore`].
///
/// Uses Diesel with an r2d2 pool. All database work runs on the blocking
/// thread pool via [`tokio::task::spawn_blocking`].
///
/// # Example
///
/// ```ignore
/// use diesel::r2d2::{ConnectionManager, Pool};
/// use diesel::PgConnection;
/// use teamdesk::platform::adapters::postgres::PostgresDataStore;
///
/// let manager = ConnectionManager::<PgConnection>::new("postgres://...");
/// let pool = Pool::builder().build(manager)?;
/// let store = PostgresDataStore::new(pool);
/// ```
#[derive(Debug, Clone)]
pub struct PostgresDataStore {
    pool: PgPool,
}

impl PostgresDataStore {
    /// Creates a store over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn with_conn<F, T>(&self, operation: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PooledConn) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(StoreError::backend)?;
            operation(&mut conn)
        })
        .await
        .map_err(StoreError::backend)?
    }
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        Self::backend(err)
    }
}

fn map_diesel(collection: Option<Collection>, err: DieselError) -> StoreError {
    match (collection, err) {
        (Some(collection), DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
            StoreError::UniqueViolation {
                collection,
                constraint: info.constraint_name().unwrap_or("unknown").to_owned(),
            }
        }
        (_, other) => StoreError::backend(other),
    }
}

fn load_values(conn: &mut PgConnection, statement: Statement) -> Result<Vec<Value>, DieselError> {
    let query = statement
        .binds
        .into_iter()
        .fold(sql_query(statement.sql).into_boxed::<Pg>(), |query, value| {
            query.bind::<Jsonb, _>(value)
        });
    let rows: Vec<JsonRow> = query.load(conn)?;
    Ok(rows.into_iter().map(|row| row.record).collect())
}

fn load_records(
    conn: &mut PgConnection,
    collection: Collection,
    statement: Statement,
) -> StoreResult<Vec<Record>> {
    load_values(conn, statement)
        .map_err(|err| map_diesel(Some(collection), err))?
        .into_iter()
        .map(|value| match value {
            Value::Object(record) => Ok(record),
            other => Err(StoreError::invalid_record(
                collection,
                format!("expected a row object, got {other}"),
            )),
        })
        .collect()
}

#[async_trait]
impl DataStore for PostgresDataStore {
    async fn select(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Record>> {
        let statement = sql::select(collection, query)?;
        self.with_conn(move |conn| load_records(conn, collection, statement))
            .await
    }

    async fn insert(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> StoreResult<Vec<Record>> {
        let statements = records
            .iter()
            .map(|record| sql::insert(collection, record))
            .collect::<StoreResult<Vec<_>>>()?;
        self.with_conn(move |conn| {
            conn.transaction::<_, StoreError, _>(|tx| {
                let mut stored = Vec::with_capacity(statements.len());
                for statement in statements {
                    stored.extend(load_records(tx, collection, statement)?);
                }
                Ok(stored)
            })
        })
        .await
    }

    async fn update(
        &self,
        collection: Collection,
        query: &Query,
        patch: Record,
    ) -> StoreResult<Vec<Record>> {
        let statement = sql::update(collection, query, &patch)?;
        self.with_conn(move |conn| load_records(conn, collection, statement))
            .await
    }

    async fn delete(&self, collection: Collection, query: &Query) -> StoreResult<usize> {
        let statement = sql::delete(collection, query)?;
        self.with_conn(move |conn| {
            statement
                .binds
                .into_iter()
                .fold(sql_query(statement.sql).into_boxed::<Pg>(), |query, value| {
                    query.bind::<Jsonb, _>(value)
                })
                .execute(conn)
                .map_err(|err| map_diesel(Some(collection), err))
        })
        .await
    }

    async fn upsert(
        &self,
        collection: Collection,
        record: Record,
        conflict: &OnConflict,
    ) -> StoreResult<Option<Record>> {
        let statement = sql::upsert(collection, &record, conflict)?;
        self.with_conn(move |conn| {
            Ok(load_records(conn, collection, statement)?.into_iter().next())
        })
        .await
    }

    async fn rpc(&self, procedure: Procedure, params: Value) -> StoreResult<Value> {
        let statement = sql::rpc(procedure, params);
        self.with_conn(move |conn| {
            let values = load_values(conn, statement).map_err(|err| map_diesel(None, err))?;
            Ok(values.into_iter().next().unwrap_or(Value::Null))
        })
        .await
    }
}
