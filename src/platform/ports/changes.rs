//! Realtime change feed port.

use crate::platform::domain::ChangeEvent;
use tokio::sync::broadcast;

/// Push subscription to row-level changes across all collections.
///
/// Subscribers filter by collection and column themselves and re-read the
/// affected aggregate; events carry no ordering guarantee beyond eventual
/// delivery. A lagging subscriber may miss events and should treat
/// [`broadcast::error::RecvError::Lagged`] as "re-read now".
pub trait ChangeFeed: Send + Sync {
    /// Opens a new subscription.
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}
