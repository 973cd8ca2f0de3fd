//! File change detection.
//!
//! [`FileChangeWatcher`] is a synchronous, poll-based dirty flag over a set of
//! paths. With the `file-watch` feature, [`PollingTask`] drives it from a tokio
//! task and signals changes over a channel.

mod probe;
mod watcher;

#[cfg(feature = "file-watch")]
mod polling;

pub use probe::{FsProbe, ModifiedTimeProbe};
pub use watcher::{FileChangeWatcher, ProbeErrorPolicy};

#[cfg(feature = "file-watch")]
pub use polling::PollingTask;
