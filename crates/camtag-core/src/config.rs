use std::collections::HashMap;
use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

pub const DEFAULT_SERVER: &str = "http://localhost:3179/";
pub const SERVER_ENV: &str = "CAMTAG_SERVER";
pub const TIMEOUT_ENV: &str = "CAMTAG_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub(crate) struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub(crate) fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) server: ServerConfig,
}

impl Config {
    /// Builds a configuration snapshot from the current process environment.
    ///
    /// # Errors
    /// Returns an error if the server URL or timeout cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_snapshot(&EnvSnapshot::capture())
    }

    pub(crate) fn from_snapshot(snapshot: &EnvSnapshot) -> Result<Self> {
        let url = parse_server_url(snapshot.var(SERVER_ENV).unwrap_or(DEFAULT_SERVER))?;
        let timeout = match snapshot.var(TIMEOUT_ENV) {
            Some(value) => {
                let secs = value.trim().parse::<u64>().with_context(|| {
                    format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{value}'")
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };
        Ok(Self {
            server: ServerConfig { url, timeout },
        })
    }

    /// Replaces the server URL, e.g. from a `--server` flag.
    ///
    /// # Errors
    /// Returns an error if `raw` is not an absolute URL.
    pub fn with_server(mut self, raw: &str) -> Result<Self> {
        self.server.url = parse_server_url(raw)?;
        Ok(self)
    }

    #[must_use]
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    url: Url,
    timeout: Option<Duration>,
}

impl ServerConfig {
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request timeout; `None` lets a stalled server stall the run.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn parse_server_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw.trim()).with_context(|| format!("invalid server URL '{raw}'"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("server URL '{raw}' cannot carry request paths");
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
