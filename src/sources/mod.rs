//! Local inputs read by the shell.

mod secrets;

pub use secrets::{DEFAULT_SECRETS_PATH, OPENWEATHER_API_KEY, SecretsFile};
