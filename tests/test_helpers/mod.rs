//! Process environment overrides for integration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serialises every test that touches the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Applies environment overrides until dropped, then puts the original
/// values back.
pub struct EnvVarGuard {
    saved: Vec<(String, Option<String>)>,
    _held: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets each `Some` value and removes each `None` key.
    pub fn set_many(overrides: &[(&str, Option<&str>)]) -> Self {
        let held = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = overrides
            .iter()
            .map(|(key, value)| {
                let original = env::var(key).ok();
                apply(key, *value);
                ((*key).to_owned(), original)
            })
            .collect();
        Self {
            saved,
            _held: held,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, original) in self.saved.iter().rev() {
            apply(key, original.as_deref());
        }
    }
}

fn apply(key: &str, value: Option<&str>) {
    // SAFETY: ENV_LOCK is held by the calling guard, so no other test
    // mutates the environment concurrently.
    unsafe {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}
