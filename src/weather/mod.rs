//! Weather fetch-and-relay.

mod client;
mod model;

pub use client::{Coordinates, DEFAULT_BASE_URL, WeatherClient, WeatherClientBuilder, error_json};
pub use model::Weather;
