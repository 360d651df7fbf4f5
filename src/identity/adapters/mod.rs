//! Adapter implementations for identity ports.

mod platform;

pub use platform::PlatformProfileRepository;
