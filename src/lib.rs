//! Teamdesk: team management core.
//!
//! This crate holds the business rules of a small team workspace: a roster
//! with roles, tasks with a primary point of contact and member
//! assignments, comments with mentions and a short edit window, daily
//! attendance, and a notice board. Persistence, sign-in, file storage and
//! change notification live on a hosted data platform reached through
//! ports.
//!
//! # Architecture
//!
//! Each context follows hexagonal architecture:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports over [`platform`]
//! - **Services**: Orchestration, authorisation through [`access`]
//!
//! # Modules
//!
//! - [`platform`]: Data store, change feed, identity and storage ports
//! - [`access`]: Role and field-level permission rules
//! - [`identity`]: Profiles, roles and the signed-in principal
//! - [`task`]: Tasks, assignments and the primary POC
//! - [`comment`]: Task comments, mentions and live comment feeds
//! - [`attendance`]: Daily attendance, history and monthly summaries
//! - [`notice`]: Notices, categories, tags and images
//! - [`refresh`]: Fixed-interval background refresh
//! - [`config`] and [`telemetry`]: Environment configuration and logging

#[macro_use]
mod macros;

pub mod access;
pub mod attendance;
pub mod clock;
pub mod comment;
pub mod config;
pub mod error;
pub mod identity;
pub mod notice;
pub mod platform;
pub mod refresh;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
