//! Shell configuration: presets, file and environment overrides.

use crate::error::{Result, ShellError};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Development server the UI falls back to.
pub const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:5173";

/// Prefix for environment overrides (`DEVSHELL_TITLE`, `DEVSHELL_WEATHER__LAT`).
pub const ENV_PREFIX: &str = "DEVSHELL";

/// Separator for nested keys in environment overrides.
pub const ENV_SEPARATOR: &str = "__";

/// Host-side settings for one desktop shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Window title
    pub title: String,
    /// Initial window width in logical pixels
    pub width: u32,
    /// Initial window height in logical pixels
    pub height: u32,
    /// Enable the webview's developer tools
    pub debug: bool,
    /// Built UI entry point, relative to the base directory
    pub bundle_index: PathBuf,
    /// Development server URL used when the bundle is not used
    pub dev_server_url: String,
    /// Load the built bundle when it exists
    pub prefer_bundle: bool,
    /// Files whose changes should trigger a UI refresh
    #[serde(default)]
    pub watch_paths: Vec<PathBuf>,
    /// Interval for background polling, in milliseconds
    pub poll_interval_ms: u64,
    /// Secrets file holding API keys
    pub secrets_path: PathBuf,
    /// Weather relay settings
    pub weather: WeatherSettings,
}

/// Weather relay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSettings {
    /// Expose the `getWeather` binding
    pub enabled: bool,
    /// Secrets file key holding the API key
    pub api_key_name: String,
    /// Latitude sent to the endpoint
    pub lat: String,
    /// Longitude sent to the endpoint
    pub lon: String,
    /// Unit system
    pub units: String,
    /// Description language
    pub lang: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key_name: crate::sources::OPENWEATHER_API_KEY.to_string(),
            lat: "-6.2146".to_string(),
            lon: "106.8451".to_string(),
            units: "metric".to_string(),
            lang: "id".to_string(),
        }
    }
}

impl ShellConfig {
    /// ForePlan: 1280x820, bundle under `web/dist`, no weather binding.
    pub fn foreplan() -> Self {
        Self {
            title: "ForePlan".to_string(),
            width: 1280,
            height: 820,
            debug: cfg!(debug_assertions),
            bundle_index: PathBuf::from("web/dist/index.html"),
            dev_server_url: DEFAULT_DEV_SERVER_URL.to_string(),
            prefer_bundle: false,
            watch_paths: Vec::new(),
            poll_interval_ms: 500,
            secrets_path: PathBuf::from(crate::sources::DEFAULT_SECRETS_PATH),
            weather: WeatherSettings::default(),
        }
    }

    /// Smart Weather App: 1080x640, bundle under `smartweatherapp/dist`, weather enabled.
    pub fn smart_weather() -> Self {
        Self {
            title: "Smart Weather App".to_string(),
            width: 1080,
            height: 640,
            bundle_index: PathBuf::from("smartweatherapp/dist/index.html"),
            weather: WeatherSettings {
                enabled: true,
                ..WeatherSettings::default()
            },
            ..Self::foreplan()
        }
    }

    /// Layer an optional config file and `DEVSHELL_*` environment variables
    /// over `base`.
    ///
    /// Precedence, lowest first: `base`, the file, the environment. The file
    /// format is detected from its extension (`.yaml`, `.yml`, `.toml`, `.json`).
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use devshell_watch::shell::ShellConfig;
    /// use std::path::Path;
    ///
    /// # fn example() -> devshell_watch::error::Result<()> {
    /// let config = ShellConfig::load(Some(Path::new("devshell.toml")), ShellConfig::smart_weather())?;
    /// println!("{} {}x{}", config.title, config.width, config.height);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, if the merged
    /// values do not deserialize, or if `poll_interval_ms` is zero.
    pub fn load(file: Option<&Path>, base: ShellConfig) -> Result<Self> {
        Self::load_with_env(file, base, env_source())
    }

    pub(crate) fn load_with_env(
        file: Option<&Path>,
        base: ShellConfig,
        env: Environment,
    ) -> Result<Self> {
        let defaults = Config::try_from(&base)
            .map_err(|e| ShellError::LoadError(format!("Failed to encode defaults: {}", e)))?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = file {
            if !path.exists() {
                return Err(ShellError::LoadError(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            debug!("Loading shell configuration from {}", path.display());
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        let merged = builder
            .add_source(env)
            .build()
            .map_err(|e| ShellError::LoadError(format!("Failed to build configuration: {}", e)))?;

        let config = merged.try_deserialize::<ShellConfig>().map_err(|e| {
            ShellError::DeserializationError(format!("Failed to deserialize configuration: {}", e))
        })?;

        if config.poll_interval_ms == 0 {
            return Err(ShellError::LoadError(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }

    /// Background poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::foreplan()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(ENV_SEPARATOR)
        .list_separator(",")
        .with_list_parse_key("watch_paths")
        .try_parsing(true)
}
