//! # Kennel Configuration
//!
//! A minimal configuration system based on a string key/value store,
//! set and read through the app container:
//!
//! ```rust
//! use kennel_core::KennelApp;
//! let app = KennelApp::<(), ()>::new();
//!
//! app.set("http.port", "3000");
//! assert_eq!(app.get("http.port"), Some("3000".to_string()));
//! ```
//!
//! ## Environment overrides
//! Variables carrying an application prefix are folded into the store,
//! with `__` acting as the section separator:
//!
//! ```bash
//! export DOGS__HTTP__PORT=8080   # -> http.port = 8080
//! ```
//!
//! Formats such as TOML or YAML are left to applications.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct KennelConfig {
    values: HashMap<String, String>,
}

impl KennelConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Fold prefixed variables into the store.
    ///
    /// `PREFIX__PAGINATE__DEFAULT=25` becomes `paginate.default = 25`.
    /// Returns the number of keys applied.
    pub fn apply_prefixed<I, K, V>(&mut self, prefix: &str, vars: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut applied = 0;
        for (key, value) in vars {
            let Some(stripped) = key.as_ref().strip_prefix(prefix) else {
                continue;
            };
            let normalized = stripped.to_lowercase().replace("__", ".");
            if normalized.is_empty() {
                continue;
            }
            self.set(normalized, value);
            applied += 1;
        }
        applied
    }

    pub fn snapshot(&self) -> KennelConfigSnapshot {
        KennelConfigSnapshot::new(self.values.clone())
    }
}

/// Read-only copy of the config, cheap to hand to request handlers.
#[derive(Debug, Clone, Default)]
pub struct KennelConfigSnapshot {
    map: HashMap<String, String>,
}

impl KennelConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key).and_then(|v| v.trim().parse::<u16>().ok())
    }
}
