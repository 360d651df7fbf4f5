//! Fixed-interval background refresh.
//!
//! A [`Poller`] re-runs a loader on a timer and publishes each successful
//! result as the latest snapshot. Failed loads are logged and the previous
//! snapshot stays in place. Dropping the poller stops the loop.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Latest snapshot of a periodically reloaded value.
#[derive(Debug)]
pub struct Poller<T> {
    receiver: watch::Receiver<T>,
    cancel: CancellationToken,
}

impl<T> Poller<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns the refresh loop on the current Tokio runtime.
    ///
    /// The first load runs immediately, then every `every`. `name` labels
    /// log lines.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn spawn<F, Fut, E>(name: &'static str, initial: T, every: Duration, mut loader: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send,
        E: Display + Send,
    {
        let (sender, receiver) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = token.cancelled() => {
                        debug!(poller = name, "refresh stopped");
                        break;
                    }
                    _ = ticker.tick() => match loader().await {
                        Ok(snapshot) => {
                            if sender.send(snapshot).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            warn!(poller = name, error = %err, "refresh failed; keeping previous snapshot");
                        }
                    },
                }
            }
        });
        Self { receiver, cancel }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn latest(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Waits for the next published snapshot.
    ///
    /// Returns `None` once the loop has stopped.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Returns a receiver for callers that want to watch directly.
    #[must_use]
    pub fn receiver(&self) -> watch::Receiver<T> {
        self.receiver.clone()
    }

    /// Stops the refresh loop.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use rstest::rstest;

    use super::Poller;

    const TICK: Duration = Duration::from_millis(50);
    const WAIT: Duration = Duration::from_secs(5);

    fn counter() -> Arc<AtomicU32> {
        Arc::new(AtomicU32::new(0))
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn publishes_each_load() {
        let loads = counter();
        let mut poller = Poller::spawn("test", 0, TICK, move || {
            let count = Arc::clone(&loads);
            async move { Ok::<_, String>(count.fetch_add(1, Ordering::SeqCst) + 1) }
        });

        let first = tokio::time::timeout(WAIT, poller.next()).await.expect("first");
        let second = tokio::time::timeout(WAIT, poller.next()).await.expect("second");

        assert_eq!(first, Some(1));
        assert!(second.is_some_and(|value| value >= 2));
        assert!(poller.latest() >= 2);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn failed_load_keeps_previous_snapshot() {
        let loads = counter();
        let mut poller = Poller::spawn("test", 0, TICK, move || {
            let count = Arc::clone(&loads);
            async move {
                match count.fetch_add(1, Ordering::SeqCst) {
                    0 => Ok(1),
                    1 => Err("platform unavailable".to_owned()),
                    _ => Ok(3),
                }
            }
        });

        let first = tokio::time::timeout(WAIT, poller.next()).await.expect("first");
        let next = tokio::time::timeout(WAIT, poller.next()).await.expect("next");

        assert_eq!(first, Some(1));
        assert_eq!(next, Some(3));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn close_ends_the_stream() {
        let mut poller = Poller::spawn("test", 7, Duration::from_secs(3600), || async {
            Ok::<_, String>(7)
        });
        tokio::time::timeout(WAIT, poller.next()).await.expect("first load");

        poller.close();
        let after = tokio::time::timeout(WAIT, poller.next()).await.expect("closed");

        assert_eq!(after, None);
        assert_eq!(poller.latest(), 7);
    }
}
