//! Unit tests for the attendance module.

mod service_tests;
