//! Application services for roster and session management.

mod profile;
mod session;

pub use profile::{ProfileService, ProfileServiceError, ProfileServiceResult};
pub use session::{SessionError, SessionResult, SessionService};
