//! Application services for task and assignment management.

mod assignment;
mod error;
mod lifecycle;

pub use error::{TaskServiceError, TaskServiceResult};
pub use lifecycle::{CreateTaskRequest, TaskService};
