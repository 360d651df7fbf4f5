//! Domain model for the data platform boundary.
//!
//! These types describe what the application asks of the platform (which
//! collection, which rows, which procedure) without committing to how the
//! platform stores anything.

mod change;
mod collection;
mod procedure;
mod query;
mod record;

pub use change::{ChangeEvent, ChangeKind};
pub use collection::{Collection, GeneratedId};
pub use procedure::Procedure;
pub use query::{ConflictAction, Direction, Filter, FilterOp, OnConflict, Ordering, Query};
pub use record::{Record, compare_values, from_record, to_record};
