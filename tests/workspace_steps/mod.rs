//! Step definitions for workspace behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
