//! Named, string-in/string-out bindings for a hosted web UI.
//!
//! Webview libraries expose native functions to page scripts by name and pass
//! the call arguments as a JSON array string. [`Bridge`] keeps those handlers
//! in one place so the host only forwards `(name, request)` pairs.

use crate::error::{Result, ShellError};
use crate::watch::{FileChangeWatcher, ModifiedTimeProbe};
use serde_json::Value as JsonValue;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Binding that registers a path with the watcher.
pub const WATCH_FILE: &str = "watchFile";

/// Binding that polls the watcher, answering `"true"` or `"false"`.
pub const CHECK_FILE_CHANGES: &str = "checkFileChanges";

/// Binding that relays the weather endpoint's response.
pub const GET_WEATHER: &str = "getWeather";

type Handler = Box<dyn FnMut(&str) -> String>;

/// Registry of UI-callable handlers.
///
/// Single-threaded: handlers run on whatever thread dispatches UI calls.
///
/// # Examples
///
/// ```rust
/// use devshell_watch::bridge::Bridge;
/// use devshell_watch::watch::FileChangeWatcher;
///
/// let mut bridge = Bridge::with_watcher(FileChangeWatcher::new());
/// bridge.call("watchFile", r#"["web/src/App.tsx"]"#).unwrap();
/// assert_eq!(bridge.call("checkFileChanges", "[]").unwrap(), "false");
/// ```
#[derive(Default)]
pub struct Bridge {
    bindings: HashMap<String, Handler>,
}

impl Bridge {
    /// Create an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bridge with [`WATCH_FILE`] and [`CHECK_FILE_CHANGES`] bound to `watcher`.
    pub fn with_watcher<P>(watcher: FileChangeWatcher<P>) -> Self
    where
        P: ModifiedTimeProbe + 'static,
    {
        let mut bridge = Self::new();
        bridge.bind_watcher(Rc::new(RefCell::new(watcher)));
        bridge
    }

    /// Bind `name` to `handler`, replacing any previous binding.
    pub fn bind<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&str) -> String + 'static,
    {
        let name = name.into();
        debug!("Binding {}", name);
        self.bindings.insert(name, Box::new(handler));
    }

    /// Bind the watcher operations to a shared watcher.
    ///
    /// The host keeps its own clone of `watcher` to register paths directly.
    pub fn bind_watcher<P>(&mut self, watcher: Rc<RefCell<FileChangeWatcher<P>>>)
    where
        P: ModifiedTimeProbe + 'static,
    {
        let registrar = Rc::clone(&watcher);
        self.bind(WATCH_FILE, move |request| {
            let path = first_argument(request);
            registrar.borrow_mut().register(&path);
            String::new()
        });

        self.bind(CHECK_FILE_CHANGES, move |_| {
            watcher.borrow_mut().poll_for_changes().to_string()
        });
    }

    /// Bind [`GET_WEATHER`] to a single fetch per call.
    ///
    /// Each call blocks the dispatching thread until the request completes, so
    /// this must not be called from inside an async runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime driving the request cannot be created.
    #[cfg(feature = "weather")]
    pub fn bind_weather(&mut self, client: crate::weather::WeatherClient) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ShellError::Other(format!("Failed to create runtime: {}", e)))?;

        self.bind(GET_WEATHER, move |_| runtime.block_on(client.fetch_relay()));
        Ok(())
    }

    /// Invoke the binding called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownBinding`] if nothing is bound under `name`.
    pub fn call(&mut self, name: &str, request: &str) -> Result<String> {
        let handler = self
            .bindings
            .get_mut(name)
            .ok_or_else(|| ShellError::UnknownBinding(name.to_string()))?;
        Ok(handler(request))
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Extract the first argument from a binding request.
///
/// Accepts a JSON argument array (`["a.txt"]`), a JSON string (`"a.txt"`), or
/// the raw text.
fn first_argument(request: &str) -> String {
    match serde_json::from_str::<JsonValue>(request) {
        Ok(JsonValue::Array(args)) => match args.into_iter().next() {
            Some(JsonValue::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        },
        Ok(JsonValue::String(s)) => s,
        _ => request.trim().to_string(),
    }
}
