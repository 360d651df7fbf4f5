//! Unit tests for the authorization policy.
