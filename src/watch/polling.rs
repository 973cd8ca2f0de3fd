//! Background polling on a tokio runtime.

use super::probe::ModifiedTimeProbe;
use super::watcher::FileChangeWatcher;
use crate::error::{Result, ShellError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Periodically polls a [`FileChangeWatcher`] and signals detected changes.
///
/// The watcher is moved into the task, so it keeps a single owner and needs no
/// locking. One `()` is sent per poll that reports a change. The task stops when
/// the receiver is dropped, when [`stop`](PollingTask::stop) is called, or when
/// the handle is dropped.
///
/// # Examples
///
/// ```rust,no_run
/// use devshell_watch::watch::{FileChangeWatcher, PollingTask};
/// use std::time::Duration;
///
/// # async fn example() -> devshell_watch::error::Result<()> {
/// let mut watcher = FileChangeWatcher::new();
/// watcher.register("web/dist/index.html");
///
/// let (_task, mut rx) = PollingTask::spawn(watcher, Duration::from_millis(500))?;
/// while let Some(()) = rx.recv().await {
///     println!("reload the view");
/// }
/// # Ok(())
/// # }
/// ```
pub struct PollingTask {
    handle: JoinHandle<()>,
    interval: Duration,
}

impl PollingTask {
    /// Spawn the polling loop on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::ZeroInterval`] if `every` is zero. Nothing is
    /// spawned in that case.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn spawn<P>(
        mut watcher: FileChangeWatcher<P>,
        every: Duration,
    ) -> Result<(Self, mpsc::Receiver<()>)>
    where
        P: ModifiedTimeProbe + Send + 'static,
        P::Stamp: Send,
    {
        if every.is_zero() {
            return Err(ShellError::ZeroInterval);
        }

        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            let mut timer = interval(every);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!("Polling {} watched path(s) every {:?}", watcher.len(), every);

            loop {
                timer.tick().await;

                if tx.is_closed() {
                    break;
                }

                if watcher.poll_for_changes() && tx.send(()).await.is_err() {
                    break;
                }
            }

            debug!("Polling task finished");
        });

        Ok((
            Self {
                handle,
                interval: every,
            },
            rx,
        ))
    }

    /// Poll interval of this task.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the polling loop has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop polling.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for PollingTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
