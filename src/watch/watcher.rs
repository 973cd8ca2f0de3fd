//! Poll-based file change detection.

use super::probe::{FsProbe, ModifiedTimeProbe};
use crate::error::{Result, ShellError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What to do when a probe fails for a reason other than non-existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeErrorPolicy {
    /// Log the failure and treat the path as absent for this observation.
    #[default]
    TreatAsUnchanged,
    /// Surface the failure from `try_register` / `try_poll_for_changes`.
    Propagate,
}

/// Dirty-flag poller over a set of watched paths.
///
/// Each registered path keeps a baseline modification stamp. [`poll_for_changes`]
/// reports whether any watched path's current stamp differs from its baseline,
/// updating the baseline of the first changed path it finds and returning
/// immediately. Paths that do not exist are skipped, both at registration and
/// at poll time; absence is never an error.
///
/// The watcher is synchronous and performs no locking. Hosts that poll from
/// more than one thread must serialize calls themselves.
///
/// [`poll_for_changes`]: FileChangeWatcher::poll_for_changes
///
/// # Examples
///
/// ```rust,no_run
/// use devshell_watch::watch::FileChangeWatcher;
///
/// let mut watcher = FileChangeWatcher::new();
/// watcher.register("web/dist/index.html");
///
/// if watcher.poll_for_changes() {
///     println!("reload the view");
/// }
/// ```
#[derive(Debug)]
pub struct FileChangeWatcher<P: ModifiedTimeProbe = FsProbe> {
    probe: P,
    policy: ProbeErrorPolicy,
    baselines: HashMap<PathBuf, P::Stamp>,
}

impl FileChangeWatcher<FsProbe> {
    /// Create a watcher over the real filesystem.
    pub fn new() -> Self {
        Self::with_probe(FsProbe)
    }
}

impl Default for FileChangeWatcher<FsProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ModifiedTimeProbe> FileChangeWatcher<P> {
    /// Create a watcher that queries modification stamps through `probe`.
    pub fn with_probe(probe: P) -> Self {
        Self {
            probe,
            policy: ProbeErrorPolicy::default(),
            baselines: HashMap::new(),
        }
    }

    /// Set how probe failures other than non-existence are handled.
    pub fn with_error_policy(mut self, policy: ProbeErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active probe error policy.
    pub fn error_policy(&self) -> ProbeErrorPolicy {
        self.policy
    }

    /// Start watching `path`, recording its current modification stamp as baseline.
    ///
    /// If the path does not exist this is a no-op. Registering an already
    /// watched path overwrites its baseline with the current stamp.
    pub fn register(&mut self, path: impl AsRef<Path>) {
        // Only reachable under `ProbeErrorPolicy::Propagate`.
        if let Err(e) = self.try_register(path) {
            warn!("Ignoring failed registration: {}", e);
        }
    }

    /// Fallible form of [`register`](Self::register).
    ///
    /// Returns `true` if the path is now watched, `false` if it was skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Probe`] when the probe fails and the policy is
    /// [`ProbeErrorPolicy::Propagate`].
    pub fn try_register(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        match observe(&self.probe, self.policy, path)? {
            Some(stamp) => {
                debug!("Watching {} (baseline {:?})", path.display(), stamp);
                self.baselines.insert(path.to_path_buf(), stamp);
                Ok(true)
            }
            None => {
                debug!("Not watching {}: path does not exist", path.display());
                Ok(false)
            }
        }
    }

    /// Check whether any watched path changed since its baseline.
    ///
    /// Stops at the first changed path, moving only that path's baseline
    /// forward. Paths that no longer exist are treated as unchanged and keep
    /// their old baseline.
    pub fn poll_for_changes(&mut self) -> bool {
        match self.try_poll_for_changes() {
            Ok(changed) => changed,
            Err(e) => {
                warn!("Poll aborted: {}", e);
                false
            }
        }
    }

    /// Fallible form of [`poll_for_changes`](Self::poll_for_changes).
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Probe`] when the probe fails and the policy is
    /// [`ProbeErrorPolicy::Propagate`]. Baselines examined before the failure
    /// are left untouched.
    pub fn try_poll_for_changes(&mut self) -> Result<bool> {
        for (path, baseline) in self.baselines.iter_mut() {
            let Some(current) = observe(&self.probe, self.policy, path)? else {
                continue;
            };
            if current != *baseline {
                debug!("Change detected in {}", path.display());
                *baseline = current;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Number of watched paths.
    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    /// Whether no path is being watched.
    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }

    /// Whether `path` has a baseline.
    pub fn is_watching(&self, path: impl AsRef<Path>) -> bool {
        self.baselines.contains_key(path.as_ref())
    }

    /// The recorded baseline for `path`, if watched.
    pub fn baseline(&self, path: impl AsRef<Path>) -> Option<P::Stamp> {
        self.baselines.get(path.as_ref()).copied()
    }

    /// The probe used by this watcher.
    pub fn probe(&self) -> &P {
        &self.probe
    }
}

fn observe<P: ModifiedTimeProbe>(
    probe: &P,
    policy: ProbeErrorPolicy,
    path: &Path,
) -> Result<Option<P::Stamp>> {
    match probe.modified(path) {
        Ok(stamp) => Ok(stamp),
        Err(source) => match policy {
            ProbeErrorPolicy::TreatAsUnchanged => {
                warn!("Probe failed for {}, treating as unchanged: {}", path.display(), source);
                Ok(None)
            }
            ProbeErrorPolicy::Propagate => Err(ShellError::Probe {
                path: path.to_path_buf(),
                source,
            }),
        },
    }
}
