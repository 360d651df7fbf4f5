//! SQL statement builders for the `PostgreSQL` data store.
//!
//! Every statement reads and writes whole rows as JSON: rows come back via
//! `to_jsonb(t)` and values go in via `jsonb_populate_record`, which casts
//! each JSON value to the column's declared type. Column and table names are
//! validated identifiers and always double-quoted; every value is a bound
//! parameter, so record contents never reach the SQL text.

use serde_json::{Map, Value};

use crate::platform::{
    domain::{Collection, ConflictAction, OnConflict, Procedure, Query, Record},
    ports::{StoreError, StoreResult},
};

/// SQL text plus JSON parameters bound in order as `$1..$n` (`jsonb`).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Statement {
    pub(crate) sql: String,
    pub(crate) binds: Vec<Value>,
}

fn ident(collection: Collection, name: &str) -> StoreResult<String> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|first| first.is_ascii_lowercase() || first == '_');
    let valid_rest = chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_');
    if valid_start && valid_rest {
        Ok(format!("\"{name}\""))
    } else {
        Err(StoreError::invalid_record(
            collection,
            format!("invalid column name {name:?}"),
        ))
    }
}

fn columns<'a>(
    collection: Collection,
    names: impl IntoIterator<Item = &'a String>,
) -> StoreResult<Vec<String>> {
    names
        .into_iter()
        .map(|name| ident(collection, name))
        .collect()
}

fn where_clause(
    collection: Collection,
    query: &Query,
    binds: &mut Vec<Value>,
) -> StoreResult<String> {
    let table = collection.as_str();
    let mut predicates = Vec::with_capacity(query.filters().len());
    for filter in query.filters() {
        let column = ident(collection, &filter.column)?;
        let mut probe = Map::new();
        probe.insert(filter.column.clone(), filter.value.clone());
        binds.push(Value::Object(probe));
        let position = binds.len();
        predicates.push(format!(
            "t.{column} {} (jsonb_populate_record(NULL::{table}, ${position}::jsonb)).{column}",
            filter.op.as_sql()
        ));
    }
    Ok(if predicates.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", predicates.join(" AND "))
    })
}

/// Builds a `SELECT` honouring filters, ordering and limit.
pub(crate) fn select(collection: Collection, query: &Query) -> StoreResult<Statement> {
    let mut binds = Vec::new();
    let filter = where_clause(collection, query, &mut binds)?;
    let order = query
        .ordering()
        .iter()
        .map(|ordering| {
            ident(collection, &ordering.column)
                .map(|column| format!("t.{column} {}", ordering.direction.as_sql()))
        })
        .collect::<StoreResult<Vec<_>>>()?;
    let mut sql = format!(
        "SELECT to_jsonb(t) AS record FROM {} AS t{filter}",
        collection.as_str()
    );
    if !order.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));
    }
    if let Some(limit) = query.limit_value() {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    Ok(Statement { sql, binds })
}

fn insert_prefix(collection: Collection, record: &Record) -> StoreResult<String> {
    let table = collection.as_str();
    if record.is_empty() {
        return Ok(format!("INSERT INTO {table} AS t DEFAULT VALUES"));
    }
    let names = columns(collection, record.keys())?.join(", ");
    Ok(format!(
        "INSERT INTO {table} AS t ({names}) SELECT {names} FROM jsonb_populate_record(NULL::{table}, $1::jsonb)"
    ))
}

/// Builds a single-row `INSERT` returning the stored row.
pub(crate) fn insert(collection: Collection, record: &Record) -> StoreResult<Statement> {
    let sql = format!(
        "{} RETURNING to_jsonb(t) AS record",
        insert_prefix(collection, record)?
    );
    Ok(Statement {
        sql,
        binds: bind_record(record),
    })
}

/// Builds an `UPDATE` applying `patch` to filtered rows.
pub(crate) fn update(
    collection: Collection,
    query: &Query,
    patch: &Record,
) -> StoreResult<Statement> {
    if patch.is_empty() {
        return Err(StoreError::invalid_record(collection, "empty patch"));
    }
    let table = collection.as_str();
    let assignments = columns(collection, patch.keys())?
        .into_iter()
        .map(|column| format!("{column} = p.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut binds = vec![Value::Object(patch.clone())];
    let filter = where_clause(collection, query, &mut binds)?;
    Ok(Statement {
        sql: format!(
            "UPDATE {table} AS t SET {assignments} FROM jsonb_populate_record(NULL::{table}, $1::jsonb) AS p{filter} RETURNING to_jsonb(t) AS record"
        ),
        binds,
    })
}

/// Builds a `DELETE` over filtered rows.
pub(crate) fn delete(collection: Collection, query: &Query) -> StoreResult<Statement> {
    let mut binds = Vec::new();
    let filter = where_clause(collection, query, &mut binds)?;
    Ok(Statement {
        sql: format!("DELETE FROM {} AS t{filter}", collection.as_str()),
        binds,
    })
}

/// Builds an `INSERT .. ON CONFLICT` returning the stored row.
///
/// An ignored conflict returns no row.
pub(crate) fn upsert(
    collection: Collection,
    record: &Record,
    conflict: &OnConflict,
) -> StoreResult<Statement> {
    let target = columns(collection, conflict.columns.iter())?;
    let resolution = match conflict.action {
        ConflictAction::Ignore => "DO NOTHING".to_owned(),
        ConflictAction::Update => {
            let mut updated: Vec<String> = columns(
                collection,
                record
                    .keys()
                    .filter(|key| !conflict.columns.contains(key)),
            )?;
            if updated.is_empty() {
                // Touch a key column so RETURNING still yields the row.
                updated.extend(target.first().cloned());
            }
            let assignments = updated
                .iter()
                .map(|column| format!("{column} = EXCLUDED.{column}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("DO UPDATE SET {assignments}")
        }
    };
    Ok(Statement {
        sql: format!(
            "{} ON CONFLICT ({}) {resolution} RETURNING to_jsonb(t) AS record",
            insert_prefix(collection, record)?,
            target.join(", ")
        ),
        binds: bind_record(record),
    })
}

/// Builds a call to a platform function taking and returning `jsonb`.
pub(crate) fn rpc(procedure: Procedure, params: Value) -> Statement {
    Statement {
        sql: format!("SELECT {}($1::jsonb) AS record", procedure.as_str()),
        binds: vec![params],
    }
}

fn bind_record(record: &Record) -> Vec<Value> {
    if record.is_empty() {
        Vec::new()
    } else {
        vec![Value::Object(record.clone())]
    }
}
