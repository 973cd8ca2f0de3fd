//! Current-conditions summary.

use crate::error::{Result, ShellError};
use serde::Deserialize;
use std::fmt;

/// Current weather, reduced to what the UI shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    /// Temperature in the requested unit system
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// Wind speed in the requested unit system
    pub wind_speed: f64,
    /// Localized condition text
    pub description: String,
}

#[derive(Deserialize)]
struct OneCall {
    current: Current,
}

#[derive(Deserialize)]
struct Current {
    temp: f64,
    humidity: f64,
    wind_speed: f64,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Deserialize)]
struct Condition {
    description: String,
}

impl Weather {
    /// Extract the current conditions from a One Call response body.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::DeserializationError`] if the body is not a One
    /// Call response, including relayed `{"error": ...}` bodies.
    pub fn from_onecall(body: &str) -> Result<Self> {
        let parsed: OneCall = serde_json::from_str(body).map_err(|e| {
            ShellError::DeserializationError(format!("Failed to parse weather response: {}", e))
        })?;

        let current = parsed.current;
        Ok(Self {
            temperature: current.temp,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            description: current
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_default(),
        })
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}°, humidity {}%, wind {}",
            self.temperature, self.humidity, self.wind_speed
        )?;
        if !self.description.is_empty() {
            write!(f, ", {}", self.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_onecall() {
        let body = r#"{
            "lat": -6.2146,
            "lon": 106.8451,
            "timezone": "Asia/Jakarta",
            "current": {
                "dt": 1700000000,
                "temp": 31.4,
                "humidity": 66,
                "wind_speed": 3.6,
                "weather": [
                    {"id": 802, "main": "Clouds", "description": "awan tersebar", "icon": "03d"}
                ]
            }
        }"#;

        let weather = Weather::from_onecall(body).unwrap();
        assert_eq!(weather.temperature, 31.4);
        assert_eq!(weather.humidity, 66.0);
        assert_eq!(weather.wind_speed, 3.6);
        assert_eq!(weather.description, "awan tersebar");
    }

    #[test]
    fn test_missing_conditions_gives_empty_description() {
        let body = r#"{"current": {"temp": 20.0, "humidity": 50, "wind_speed": 1.0}}"#;
        let weather = Weather::from_onecall(body).unwrap();
        assert!(weather.description.is_empty());
    }

    #[test]
    fn test_error_body_is_rejected() {
        let result = Weather::from_onecall(r#"{"error": "CURL error"}"#);
        assert!(matches!(result, Err(ShellError::DeserializationError(_))));
    }

    #[test]
    fn test_display_summary() {
        let weather = Weather {
            temperature: 31.44,
            humidity: 66.0,
            wind_speed: 3.6,
            description: "awan tersebar".to_string(),
        };
        assert_eq!(
            weather.to_string(),
            "31.4°, humidity 66%, wind 3.6, awan tersebar"
        );

        let bare = Weather {
            description: String::new(),
            ..weather
        };
        assert_eq!(bare.to_string(), "31.4°, humidity 66%, wind 3.6");
    }
}
