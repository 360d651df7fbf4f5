//! Runtime configuration read from the environment.
//!
//! | Variable                            | Default         |
//! |-------------------------------------|-----------------|
//! | `TEAMDESK_PLATFORM_URL`             | required        |
//! | `TEAMDESK_ANON_KEY`                 | required        |
//! | `TEAMDESK_NOTICE_BUCKET`            | `notice-images` |
//! | `TEAMDESK_COMMENT_EDIT_WINDOW_SECS` | `300`           |
//! | `TEAMDESK_TASK_POLL_SECS`           | `10`            |
//! | `TEAMDESK_ROSTER_POLL_SECS`         | `30`            |
//! | `TEAMDESK_NOTICE_POLL_SECS`         | `30`            |
//! | `TEAMDESK_ATTENDANCE_HISTORY_DAYS`  | `30`            |
//! | `TEAMDESK_LOG_LEVEL`                | `info`          |
//! | `TEAMDESK_LOG_FORMAT`               | `compact`       |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::attendance::services::DEFAULT_HISTORY_DAYS;
use crate::comment::services::DEFAULT_EDIT_WINDOW_SECS;
use crate::notice::services::DEFAULT_IMAGE_BUCKET;
use crate::telemetry::LogFormat;

const PLATFORM_URL: &str = "TEAMDESK_PLATFORM_URL";
const ANON_KEY: &str = "TEAMDESK_ANON_KEY";
const NOTICE_BUCKET: &str = "TEAMDESK_NOTICE_BUCKET";
const EDIT_WINDOW: &str = "TEAMDESK_COMMENT_EDIT_WINDOW_SECS";
const TASK_POLL: &str = "TEAMDESK_TASK_POLL_SECS";
const ROSTER_POLL: &str = "TEAMDESK_ROSTER_POLL_SECS";
const NOTICE_POLL: &str = "TEAMDESK_NOTICE_POLL_SECS";
const HISTORY_DAYS: &str = "TEAMDESK_ATTENDANCE_HISTORY_DAYS";
const LOG_LEVEL: &str = "TEAMDESK_LOG_LEVEL";
const LOG_FORMAT: &str = "TEAMDESK_LOG_FORMAT";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),
    /// A variable holds an unusable value.
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the hosted platform.
    pub platform_url: String,
    /// Public API key sent with platform requests.
    pub anon_key: String,
    /// Bucket for notice images.
    pub notice_bucket: String,
    /// How long authors may edit a comment.
    pub comment_edit_window: Duration,
    /// Task list refresh interval.
    pub task_poll: Duration,
    /// Roster refresh interval.
    pub roster_poll: Duration,
    /// Notice board refresh interval.
    pub notice_poll: Duration,
    /// Default attendance history window in days.
    pub attendance_history_days: u32,
    /// Tracing filter directive.
    pub log_level: String,
    /// Log line layout.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads `.env` when present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a missing required variable or an
    /// unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a missing required variable or an
    /// unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let required = |key: &'static str| read(key).ok_or(ConfigError::Missing(key));
        let seconds = |key: &'static str, default: u64| -> Result<Duration, ConfigError> {
            let secs = parse_or(key, read(key), default)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    value: secs.to_string(),
                    reason: "must be positive".to_owned(),
                });
            }
            Ok(Duration::from_secs(secs))
        };
        let edit_window_default = u64::try_from(DEFAULT_EDIT_WINDOW_SECS).unwrap_or(300);

        Ok(Self {
            platform_url: required(PLATFORM_URL)?.trim_end_matches('/').to_owned(),
            anon_key: required(ANON_KEY)?,
            notice_bucket: read(NOTICE_BUCKET).unwrap_or_else(|| DEFAULT_IMAGE_BUCKET.to_owned()),
            comment_edit_window: seconds(EDIT_WINDOW, edit_window_default)?,
            task_poll: seconds(TASK_POLL, 10)?,
            roster_poll: seconds(ROSTER_POLL, 30)?,
            notice_poll: seconds(NOTICE_POLL, 30)?,
            attendance_history_days: parse_or(HISTORY_DAYS, read(HISTORY_DAYS), DEFAULT_HISTORY_DAYS)?,
            log_level: read(LOG_LEVEL).unwrap_or_else(|| "info".to_owned()),
            log_format: parse_or(LOG_FORMAT, read(LOG_FORMAT), LogFormat::default())?,
        })
    }

    /// Returns the comment edit window as a signed duration.
    #[must_use]
    pub fn comment_edit_window(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.comment_edit_window)
            .unwrap_or_else(|_| chrono::Duration::seconds(DEFAULT_EDIT_WINDOW_SECS))
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value.parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
            value,
        })
    })
}
