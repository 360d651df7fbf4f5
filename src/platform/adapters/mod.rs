//! Adapter implementations for the platform ports.

pub mod memory;
pub mod postgres;
