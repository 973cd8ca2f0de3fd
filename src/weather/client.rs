//! Single-shot OpenWeather fetch.

use crate::error::{Result, ShellError};
use crate::shell::WeatherSettings;
use crate::sources::SecretsFile;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// OpenWeather One Call 3.0 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Latitude/longitude pair, kept as the strings sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: String,
    /// Longitude in decimal degrees
    pub lon: String,
}

impl Coordinates {
    /// Create coordinates from anything displayable.
    pub fn new(lat: impl ToString, lon: impl ToString) -> Self {
        Self {
            lat: lat.to_string(),
            lon: lon.to_string(),
        }
    }

    /// Central Jakarta.
    pub fn jakarta() -> Self {
        Self::new("-6.2146", "106.8451")
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::jakarta()
    }
}

/// Client that fetches current weather once per call and relays the raw body.
///
/// There is no retry. Any HTTP status is relayed as-is; only transport failures
/// are errors.
///
/// # Examples
///
/// ```rust,no_run
/// use devshell_watch::sources::SecretsFile;
/// use devshell_watch::weather::WeatherClient;
///
/// # async fn example() -> devshell_watch::error::Result<()> {
/// let client = WeatherClient::builder()
///     .with_api_key_from(&SecretsFile::default(), "OPENWEATHER_API_KEY")
///     .with_units("metric")
///     .build()?;
///
/// let body = client.fetch_relay().await;
/// println!("{}", body);
/// # Ok(())
/// # }
/// ```
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    coordinates: Coordinates,
    units: String,
    lang: String,
}

impl WeatherClient {
    /// Create a new builder with the shell's defaults.
    pub fn builder() -> WeatherClientBuilder {
        WeatherClientBuilder::new()
    }

    /// The full request URL, including the API key.
    pub fn request_url(&self) -> String {
        format!(
            "{}?lat={}&lon={}&units={}&lang={}&appid={}",
            self.base_url,
            self.coordinates.lat,
            self.coordinates.lon,
            self.units,
            self.lang,
            self.api_key
        )
    }

    /// Coordinates this client asks about.
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Issue one GET and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Http`] if the request cannot be sent or the body
    /// cannot be read.
    pub async fn fetch(&self) -> Result<String> {
        debug!(
            "Fetching weather for ({}, {}) from {}",
            self.coordinates.lat, self.coordinates.lon, self.base_url
        );

        let response = self.client.get(self.request_url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Weather endpoint answered {}", status);
        }

        Ok(response.text().await?)
    }

    /// Fetch and return either the body or `{"error": "<message>"}`.
    pub async fn fetch_relay(&self) -> String {
        match self.fetch().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Weather fetch failed: {}", e);
                error_json(&e.to_string())
            }
        }
    }
}

/// Render `{"error": "<message>"}` with proper escaping.
pub fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Builder for constructing a [`WeatherClient`].
pub struct WeatherClientBuilder {
    base_url: String,
    api_key: String,
    coordinates: Coordinates,
    units: String,
    lang: String,
    timeout: Duration,
}

impl WeatherClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            coordinates: Coordinates::default(),
            units: "metric".to_string(),
            lang: "id".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Start from shell settings, reading the API key from `secrets`.
    pub fn from_settings(settings: &WeatherSettings, secrets: &SecretsFile) -> Self {
        Self::new()
            .with_api_key_from(secrets, &settings.api_key_name)
            .with_coordinates(Coordinates::new(&settings.lat, &settings.lon))
            .with_units(&settings.units)
            .with_lang(&settings.lang)
    }

    /// Set the API key directly.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Read the API key from a secrets file. A missing key yields an empty key,
    /// which the endpoint rejects with its own error body.
    pub fn with_api_key_from(mut self, secrets: &SecretsFile, key_name: &str) -> Self {
        self.api_key = secrets.lookup(key_name);
        if self.api_key.is_empty() {
            warn!("No {} in {}", key_name, secrets.path().display());
        }
        self
    }

    /// Set the coordinates to query.
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Set the unit system (`metric`, `imperial`, `standard`).
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Set the description language code.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Override the endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout. Default is 10 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<WeatherClient> {
        if self.base_url.is_empty() {
            return Err(ShellError::LoadError(
                "Base URL is required for WeatherClient".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ShellError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(WeatherClient {
            client,
            base_url: self.base_url,
            api_key: self.api_key,
            coordinates: self.coordinates,
            units: self.units,
            lang: self.lang,
        })
    }
}

impl Default for WeatherClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_request_url() {
        let client = WeatherClient::builder().with_api_key("k3y").build().unwrap();
        assert_eq!(
            client.request_url(),
            "https://api.openweathermap.org/data/3.0/onecall?lat=-6.2146&lon=106.8451&units=metric&lang=id&appid=k3y"
        );
    }

    #[test]
    fn test_builder_overrides() {
        let client = WeatherClient::builder()
            .with_api_key("k")
            .with_coordinates(Coordinates::new(51.5, -0.12))
            .with_units("imperial")
            .with_lang("en")
            .with_base_url("http://localhost:9999/onecall")
            .with_timeout(Duration::from_secs(1))
            .build()
            .unwrap();

        assert_eq!(client.coordinates(), &Coordinates::new("51.5", "-0.12"));
        assert_eq!(
            client.request_url(),
            "http://localhost:9999/onecall?lat=51.5&lon=-0.12&units=imperial&lang=en&appid=k"
        );
    }

    #[test]
    fn test_builder_empty_base_url() {
        let result = WeatherClient::builder().with_base_url("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_from_secrets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".secrets");
        fs::write(&path, "OPENWEATHER_API_KEY=from-file\n").unwrap();

        let client = WeatherClient::builder()
            .with_api_key_from(&SecretsFile::new(path), "OPENWEATHER_API_KEY")
            .build()
            .unwrap();
        assert!(client.request_url().ends_with("appid=from-file"));
    }

    #[test]
    fn test_from_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".secrets");
        fs::write(&path, "WEATHER_KEY=abc\n").unwrap();

        let settings = WeatherSettings {
            enabled: true,
            api_key_name: "WEATHER_KEY".to_string(),
            lat: "1.5".to_string(),
            lon: "2.5".to_string(),
            units: "standard".to_string(),
            lang: "en".to_string(),
        };
        let client = WeatherClientBuilder::from_settings(&settings, &SecretsFile::new(path))
            .build()
            .unwrap();
        assert!(
            client
                .request_url()
                .ends_with("?lat=1.5&lon=2.5&units=standard&lang=en&appid=abc")
        );
    }

    #[test]
    fn test_error_json_escapes_message() {
        let json = error_json("bad \"quote\"");
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["error"], "bad \"quote\"");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_relays_error() {
        let client = WeatherClient::builder()
            .with_base_url("http://127.0.0.1:1/onecall")
            .with_timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        assert!(client.fetch().await.is_err());

        let body = client.fetch_relay().await;
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(parsed["error"].as_str().unwrap().contains("HTTP request failed"));
    }
}
