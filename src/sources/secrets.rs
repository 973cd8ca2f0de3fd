//! Plain-text `KEY=VALUE` secrets file.

use crate::error::{Result, ShellError};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default secrets file, relative to the working directory.
pub const DEFAULT_SECRETS_PATH: &str = ".secrets";

/// Key holding the OpenWeather API key.
pub const OPENWEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";

/// Secrets file with one `KEY=VALUE` pair per line.
///
/// Each line is split at its first `=`; everything after it is the value,
/// untrimmed. Lines without `=` and lines with an empty value are ignored,
/// so a later line for the same key can still match. The file is re-read on every
/// lookup so edits are picked up without a restart.
///
/// # Examples
///
/// ```rust,no_run
/// use devshell_watch::sources::SecretsFile;
///
/// let secrets = SecretsFile::new(".secrets");
/// let key = secrets.lookup("OPENWEATHER_API_KEY");
/// if key.is_empty() {
///     eprintln!("no API key configured");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SecretsFile {
    path: PathBuf,
}

impl SecretsFile {
    /// Create a secrets file reader for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up `key`, returning an empty string if the key is absent or the
    /// file cannot be opened.
    pub fn lookup(&self, key: &str) -> String {
        match self.try_lookup(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!("{}", e);
                String::new()
            }
        }
    }

    /// Look up `key`, returning the first matching value.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Secrets`] if the file cannot be opened or read.
    pub fn try_lookup(&self, key: &str) -> Result<Option<String>> {
        let reader = self.open()?;
        for line in reader.lines() {
            let line = line.map_err(|source| self.error(source))?;
            if let Some((k, v)) = split_pair(&line) {
                if k == key {
                    return Ok(Some(v.to_string()));
                }
            }
        }
        Ok(None)
    }

    /// Read every pair in the file. The first occurrence of a key wins.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Secrets`] if the file cannot be opened or read.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        let reader = self.open()?;
        let mut map = HashMap::new();
        for line in reader.lines() {
            let line = line.map_err(|source| self.error(source))?;
            if let Some((k, v)) = split_pair(&line) {
                map.entry(k.to_string()).or_insert_with(|| v.to_string());
            }
        }
        Ok(map)
    }

    fn open(&self) -> Result<BufReader<File>> {
        File::open(&self.path)
            .map(BufReader::new)
            .map_err(|source| self.error(source))
    }

    fn error(&self, source: std::io::Error) -> ShellError {
        ShellError::Secrets {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for SecretsFile {
    fn default() -> Self {
        Self::new(DEFAULT_SECRETS_PATH)
    }
}

/// `KEY=VALUE` with a non-empty value. `KEY=` lines are skipped.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.split_once('=').filter(|(_, value)| !value.is_empty())
}
