//! Adapter implementations for task ports.

mod platform;

pub use platform::PlatformTaskRepository;
