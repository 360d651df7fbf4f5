//! Unit tests for the platform ports and adapters.

mod query_tests;

use crate::test_support::record;
