//! Domain model for tasks and their assignments.
//!
//! A task has exactly one primary POC, mirrored both on the task row and as
//! the single flagged row among its assignments. Edits are gated per field,
//! so patches carry the set of fields they touch.

mod assignment;
mod error;
mod field;
mod ids;
mod patch;
mod status;
mod task;

pub use assignment::TaskAssignment;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use field::{TaskField, TaskFieldSet};
pub use ids::{AssignmentId, TaskId};
pub use patch::TaskPatch;
pub use status::{TaskStatus, TaskStatusCounts};
pub use task::{NewTask, Task};
