//! Domain model for roster profiles and roles.

mod error;
mod ids;
mod principal;
mod profile;
mod role;

pub use error::ParseRoleError;
pub use ids::ProfileId;
pub use principal::Principal;
pub use profile::{Profile, ProfileUpdate};
pub use role::Role;
