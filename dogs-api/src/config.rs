use std::env;

use anyhow::{anyhow, Result};
use kennel_core::KennelApp;

use crate::services::dogs::Dog;
use crate::services::DogsParams;

pub const ENV_PREFIX: &str = "DOGS__";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_DATABASE_URL: &str = "sqlite://dev.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Test,
}

impl Mode {
    fn from_env(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("test") => Mode::Test,
            _ => Mode::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Test => "test",
        }
    }

    fn default_port(&self) -> u16 {
        match self {
            Mode::Development => 3000,
            Mode::Test => 3001,
        }
    }

    fn database_url_var(&self) -> &'static str {
        match self {
            Mode::Development => "DATABASE_URL",
            Mode::Test => "TEST_DATABASE_URL",
        }
    }
}

/// Load settings from the process environment.
pub fn config(app: &KennelApp<Dog, DogsParams>) -> Result<()> {
    configure_from(app, |key| env::var(key).ok(), env::vars())
}

/// Load settings through `lookup`, then fold `DOGS__SECTION__KEY` overrides from `vars`.
pub fn configure_from<F, I>(app: &KennelApp<Dog, DogsParams>, lookup: F, vars: I) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    I: IntoIterator<Item = (String, String)>,
{
    let mode = Mode::from_env(lookup("APP_ENV").as_deref());
    app.set("app.env", mode.as_str());

    configure_http(app, mode, &lookup)?;
    configure_database(app, mode, &lookup);

    let overrides = app.load_env(ENV_PREFIX, vars);
    if overrides > 0 {
        tracing::debug!(overrides, "applied environment overrides");
    }

    // overrides can replace the port too
    http_port(app)?;
    Ok(())
}

fn configure_http<F>(app: &KennelApp<Dog, DogsParams>, mode: Mode, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let host = lookup("HTTP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = lookup("HTTP_PORT").unwrap_or_else(|| mode.default_port().to_string());

    app.set("http.host", host);
    app.set("http.port", port);
    Ok(())
}

fn configure_database<F>(app: &KennelApp<Dog, DogsParams>, mode: Mode, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let url = lookup(mode.database_url_var())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    app.set("database.url", url);
}

pub fn http_host(app: &KennelApp<Dog, DogsParams>) -> String {
    app.get("http.host").unwrap_or_else(|| DEFAULT_HOST.to_string())
}

pub fn http_port(app: &KennelApp<Dog, DogsParams>) -> Result<u16> {
    let snapshot = app.config_snapshot();
    let raw = snapshot
        .get("http.port")
        .ok_or_else(|| anyhow!("Missing http.port"))?;
    snapshot
        .get_u16("http.port")
        .ok_or_else(|| anyhow!("Invalid http.port: {raw}"))
}

pub fn database_url(app: &KennelApp<Dog, DogsParams>) -> String {
    app.get("database.url")
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}
