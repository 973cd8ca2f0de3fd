//! Modification-time probes.

use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Capability for answering "does this path exist, and when was it last modified".
///
/// `Ok(None)` means the path does not exist. `Err(_)` is reserved for failures
/// other than non-existence (permission denied, I/O errors).
///
/// # Examples
///
/// ```rust
/// use devshell_watch::watch::{FsProbe, ModifiedTimeProbe};
///
/// let probe = FsProbe;
/// assert!(probe.modified("/definitely/not/here".as_ref()).unwrap().is_none());
/// ```
pub trait ModifiedTimeProbe {
    /// Opaque, comparable modification stamp.
    type Stamp: Copy + Eq + std::fmt::Debug;

    /// Query the current modification stamp of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the query fails for a reason other than
    /// the path not existing.
    fn modified(&self, path: &Path) -> io::Result<Option<Self::Stamp>>;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ModifiedTimeProbe for FsProbe {
    type Stamp = SystemTime;

    fn modified(&self, path: &Path) -> io::Result<Option<SystemTime>> {
        match std::fs::metadata(path) {
            Ok(metadata) => metadata.modified().map(Some),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl<P: ModifiedTimeProbe + ?Sized> ModifiedTimeProbe for &P {
    type Stamp = P::Stamp;

    fn modified(&self, path: &Path) -> io::Result<Option<P::Stamp>> {
        (**self).modified(path)
    }
}
