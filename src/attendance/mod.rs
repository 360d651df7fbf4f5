//! Daily attendance for teamdesk.
//!
//! Each roster member has at most one attendance row per calendar day;
//! marking again overwrites it. A day without a row reads as `Absent`.
//! Members mark and read their own attendance; admins may do so for anyone
//! and see the team-wide monthly summary.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
