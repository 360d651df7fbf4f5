//! Unit tests for the identity module.

mod domain_tests;
mod profile_service_tests;
