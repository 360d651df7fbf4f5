//! Adapter implementations for attendance ports.

mod platform;

pub use platform::PlatformAttendanceRepository;
