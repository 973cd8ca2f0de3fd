//! Choosing what the webview navigates to.

use super::settings::ShellConfig;
use crate::error::{Result, ShellError};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the UI is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// Built bundle, as a `file://` URL
    Bundle(String),
    /// Running development server
    DevServer(String),
}

impl LaunchTarget {
    /// URL to navigate to.
    pub fn url(&self) -> &str {
        match self {
            Self::Bundle(url) | Self::DevServer(url) => url,
        }
    }

    /// Whether this is the development server fallback.
    pub fn is_dev_server(&self) -> bool {
        matches!(self, Self::DevServer(_))
    }
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundle(url) => write!(f, "bundle {}", url),
            Self::DevServer(url) => write!(f, "dev server {}", url),
        }
    }
}

/// Pick the built bundle under `base_dir` if preferred and present, otherwise
/// the development server.
pub fn resolve_launch_target(config: &ShellConfig, base_dir: &Path) -> LaunchTarget {
    let index = base_dir.join(&config.bundle_index);
    info!("Looking for UI bundle at {}", index.display());

    if config.prefer_bundle && index.is_file() {
        match to_file_url(&index) {
            Ok(url) => {
                info!("Using UI bundle: {}", url);
                return LaunchTarget::Bundle(url);
            }
            Err(e) => info!("Cannot address bundle, falling back: {}", e),
        }
    }

    info!(
        "Using development server at {} (run `npm run dev` in the frontend folder)",
        config.dev_server_url
    );
    LaunchTarget::DevServer(config.dev_server_url.clone())
}

/// Convert a filesystem path to a `file://` URL with forward slashes.
///
/// # Errors
///
/// Returns an error if the path cannot be made absolute.
pub fn to_file_url(path: &Path) -> Result<String> {
    let absolute = std::path::absolute(path)?;
    let mut generic = absolute.to_string_lossy().into_owned();

    if cfg!(windows) {
        generic = generic.replace('\\', "/");
    }
    if !generic.starts_with('/') {
        generic.insert(0, '/');
    }

    Ok(format!("file://{}", generic))
}

/// Directory containing the running executable.
///
/// # Errors
///
/// Returns an error if the executable path cannot be determined.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ShellError::Other(format!("Executable has no parent: {}", exe.display())))
}
