//! Adapter implementations for notice ports.

mod platform;

pub use platform::PlatformNoticeRepository;
