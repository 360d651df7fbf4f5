//! Collection query description: filters, ordering and limit.

use super::{Record, compare_values};
use serde_json::Value;
use std::cmp::Ordering as CmpOrdering;

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Column equals value.
    Eq,
    /// Column is greater than or equal to value.
    Gte,
    /// Column is less than or equal to value.
    Lte,
}

impl FilterOp {
    /// Returns the SQL comparison operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// A single column predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Column name.
    pub column: String,
    /// Comparison.
    pub op: FilterOp,
    /// Right-hand operand.
    pub value: Value,
}

impl Filter {
    /// Returns `true` when the record satisfies the predicate.
    ///
    /// Missing and null columns never match, mirroring SQL comparison with
    /// `NULL`.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        let Some(actual) = record.get(&self.column).filter(|value| !value.is_null()) else {
            return false;
        };
        let Some(ordering) = compare_values(actual, &self.value) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => ordering == CmpOrdering::Equal,
            FilterOp::Gte => ordering != CmpOrdering::Less,
            FilterOp::Lte => ordering != CmpOrdering::Greater,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest first, nulls last.
    Ascending,
    /// Largest first, nulls first.
    Descending,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// One ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    /// Column name.
    pub column: String,
    /// Direction.
    pub direction: Direction,
}

/// Read/write scope over a collection.
///
/// Mutating operations only consult the filters; ordering and limit apply to
/// reads.
///
/// # Examples
///
/// ```
/// use teamdesk::platform::domain::{Direction, Query};
///
/// let query = Query::new()
///     .eq("task_id", "4f1c")
///     .order_by("created_at", Direction::Ascending)
///     .limit(20);
/// assert_eq!(query.filters().len(), 1);
/// assert_eq!(query.limit_value(), Some(20));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    order: Vec<Ordering>,
    limit: Option<usize>,
}

impl Query {
    /// Creates an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality filter.
    #[must_use]
    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Eq, value)
    }

    /// Adds a greater-than-or-equal filter.
    #[must_use]
    pub fn gte(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Gte, value)
    }

    /// Adds a less-than-or-equal filter.
    #[must_use]
    pub fn lte(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Lte, value)
    }

    fn filter(mut self, column: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            op,
            value: value.into(),
        });
        self
    }

    /// Appends an ordering key. Keys apply in insertion order.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order.push(Ordering {
            column: column.into(),
            direction,
        });
        self
    }

    /// Limits the number of returned rows.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the filters.
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns the ordering keys.
    #[must_use]
    pub fn ordering(&self) -> &[Ordering] {
        &self.order
    }

    /// Returns the row limit, if any.
    #[must_use]
    pub const fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    /// Returns `true` when every filter matches the record.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    /// Filters, sorts (stably) and limits the given rows.
    #[must_use]
    pub fn apply<'a>(&self, rows: impl IntoIterator<Item = &'a Record>) -> Vec<Record> {
        let mut selected: Vec<Record> = rows
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        selected.sort_by(|left, right| compare_rows(&self.order, left, right));
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Compares two rows over the ordering keys.
///
/// Nulls sort as the largest value, so they come last ascending and first
/// descending.
fn compare_rows(order: &[Ordering], left: &Record, right: &Record) -> CmpOrdering {
    for key in order {
        let lhs = left.get(&key.column).unwrap_or(&Value::Null);
        let rhs = right.get(&key.column).unwrap_or(&Value::Null);
        let natural = match (lhs.is_null(), rhs.is_null()) {
            (true, true) => CmpOrdering::Equal,
            (true, false) => CmpOrdering::Greater,
            (false, true) => CmpOrdering::Less,
            (false, false) => compare_values(lhs, rhs).unwrap_or(CmpOrdering::Equal),
        };
        let directed = match key.direction {
            Direction::Ascending => natural,
            Direction::Descending => natural.reverse(),
        };
        if directed != CmpOrdering::Equal {
            return directed;
        }
    }
    CmpOrdering::Equal
}

/// Behaviour when an upsert hits an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAction {
    /// Overwrite the existing row's columns with the supplied values.
    Update,
    /// Keep the existing row untouched.
    Ignore,
}

/// Conflict target and resolution for an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnConflict {
    /// Columns forming the unique key that detects the conflict.
    pub columns: Vec<String>,
    /// Resolution.
    pub action: ConflictAction,
}

impl OnConflict {
    /// Overwrites on conflict over `columns`.
    #[must_use]
    pub fn update(columns: &[&str]) -> Self {
        Self::with_action(columns, ConflictAction::Update)
    }

    /// Ignores the write on conflict over `columns`.
    #[must_use]
    pub fn ignore(columns: &[&str]) -> Self {
        Self::with_action(columns, ConflictAction::Ignore)
    }

    fn with_action(columns: &[&str], action: ConflictAction) -> Self {
        Self {
            columns: columns.iter().map(|column| (*column).to_owned()).collect(),
            action,
        }
    }
}
