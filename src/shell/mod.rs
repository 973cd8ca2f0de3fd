//! Host-side shell settings and launch target selection.

mod launch;
mod settings;

pub use launch::{LaunchTarget, executable_dir, resolve_launch_target, to_file_url};
pub use settings::{
    DEFAULT_DEV_SERVER_URL, ENV_PREFIX, ENV_SEPARATOR, ShellConfig, WeatherSettings,
};

