//! # devshell-watch
//!
//! Poll-based file change detection and the host-side plumbing around it for
//! desktop shells that embed a web UI.
//!
//! ## Overview
//!
//! The core is [`watch::FileChangeWatcher`]: register paths, then ask
//! "has anything changed since last time?" whenever the UI polls. Around it:
//!
//! - [`bridge::Bridge`]: name-addressed, string-returning bindings a webview
//!   exposes to page scripts (`watchFile`, `checkFileChanges`, `getWeather`)
//! - [`shell::ShellConfig`]: window presets, launch target selection and
//!   config-file / environment overrides
//! - [`sources::SecretsFile`]: `KEY=VALUE` secrets lookup
//! - `weather::WeatherClient`: single-shot fetch-and-relay (feature `weather`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use devshell_watch::prelude::*;
//!
//! # fn example() -> devshell_watch::error::Result<()> {
//! let config = ShellConfig::load(None, ShellConfig::foreplan())?;
//!
//! let mut watcher = FileChangeWatcher::new();
//! for path in &config.watch_paths {
//!     watcher.register(path);
//! }
//!
//! let mut bridge = Bridge::with_watcher(watcher);
//! let changed = bridge.call("checkFileChanges", "[]")?;
//! println!("changed: {}", changed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `file-watch` (default): [`watch::PollingTask`] background polling on tokio
//! - `weather` (default): OpenWeather client and the `getWeather` binding
//! - `cli` (default): the headless `devshell` binary

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod bridge;
pub mod error;
pub mod shell;
pub mod sources;
pub mod watch;

#[cfg(feature = "weather")]
pub mod weather;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::bridge::Bridge;
    pub use crate::error::{Result, ShellError};
    pub use crate::shell::{LaunchTarget, ShellConfig, resolve_launch_target};
    pub use crate::sources::SecretsFile;
    pub use crate::watch::{FileChangeWatcher, ProbeErrorPolicy};

    #[cfg(feature = "file-watch")]
    pub use crate::watch::PollingTask;

    #[cfg(feature = "weather")]
    pub use crate::weather::WeatherClient;
}
