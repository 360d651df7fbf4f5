//! Adapter implementations for comment ports.

mod platform;

pub use platform::PlatformCommentRepository;
