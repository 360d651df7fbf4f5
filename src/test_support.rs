//! Shared fixtures for unit tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::clock::ManualClock;
use crate::identity::domain::{Principal, Profile, ProfileId, Role};
use crate::platform::{
    adapters::memory::InMemoryDataStore,
    domain::{Collection, Record, to_record},
    ports::DataStore,
};

/// Monday 2 March 2026, 09:00 UTC.
pub(crate) fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-02T09:00:00Z")
        .map(|at| at.with_timezone(&Utc))
        .expect("valid timestamp")
}

pub(crate) fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(fixed_now()))
}

/// Inserts a profile straight into the store and returns its principal.
pub(crate) async fn seed_profile(store: &InMemoryDataStore, name: &str, role: Role) -> Principal {
    let clock = ManualClock::new(fixed_now());
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let mut profile = Profile::new(ProfileId::new(), email, Some(name.to_owned()), &clock);
    profile.set_role(role, &clock);
    store
        .insert(
            Collection::Profiles,
            vec![to_record(&profile).expect("profile record")],
        )
        .await
        .expect("seed profile");
    profile.principal()
}

/// Converts a `json!` object literal into a record.
pub(crate) fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
