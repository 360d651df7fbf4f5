//! Notices and announcements for teamdesk.
//!
//! Admins publish notices with an optional category, tags, image and video
//! link; everyone reads them. Pinned notices list first, then the newest.
//! View counts are bumped on every open without de-duplication.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
