use std::env;

use crate::constants::{ENV_API_HOST_URL, ENV_API_KEY, ENV_VERIFY_SSL};
use crate::error::{ImportError, ImportResult};
use crate::logging::log_debug;

/// Connection settings for the eLabFTW API, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_host_url: String,
    pub api_key: String,
    pub verify_ssl: bool,
}

impl Config {
    /// Load `.env` from the working directory, then read the process environment.
    /// Variables already set in the environment take precedence over `.env`.
    pub fn from_env() -> ImportResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log_debug(&format!("Loaded environment from {}", path.display())),
            Err(e) if e.not_found() => log_debug("No .env file found"),
            Err(e) => {
                return Err(ImportError::InvalidConfig(format!(
                    "Failed to read .env file: {}",
                    e
                )))
            }
        }

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ImportResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_host_url = required(&lookup, ENV_API_HOST_URL)?;
        let api_key = required(&lookup, ENV_API_KEY)?;

        if !(api_host_url.starts_with("http://") || api_host_url.starts_with("https://")) {
            return Err(ImportError::InvalidConfig(format!(
                "{} must start with http:// or https://, got '{}'",
                ENV_API_HOST_URL, api_host_url
            )));
        }

        let verify_ssl = match lookup(ENV_VERIFY_SSL) {
            Some(value) if !value.trim().is_empty() => parse_bool(ENV_VERIFY_SSL, &value)?,
            _ => true,
        };

        Ok(Config {
            api_host_url: api_host_url.trim_end_matches('/').to_string(),
            api_key,
            verify_ssl,
        })
    }

    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    /// Key with everything but the edges masked, for log output.
    pub fn masked_api_key(&self) -> String {
        let key = &self.api_key;
        let chars: Vec<char> = key.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

fn required<F>(lookup: &F, name: &str) -> ImportResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ImportError::MissingConfig(name.to_string()))
}

fn parse_bool(name: &str, value: &str) -> ImportResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ImportError::InvalidConfig(format!(
            "{} must be a boolean (true/false), got '{}'",
            name, other
        ))),
    }
}
