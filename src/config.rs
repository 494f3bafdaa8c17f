//! Runtime configuration, read from `EMENU_*` environment variables.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::notifications::ReconnectPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the restaurant API, without a trailing slash.
    pub api_url: String,
    pub session_file: PathBuf,
    pub submit_timeout: Duration,
    pub reconnect_attempts: u32,
    pub reconnect_delay: Duration,
    pub actor_buffer: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url: String = try_load(&lookup, "EMENU_API_URL", "http://localhost:5000/api")?;
        let actor_buffer: usize = try_load(&lookup, "EMENU_ACTOR_BUFFER", "32")?;
        if actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "EMENU_ACTOR_BUFFER",
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            session_file: try_load(&lookup, "EMENU_SESSION_FILE", ".emenu/session.json")?,
            submit_timeout: Duration::from_secs(try_load(&lookup, "EMENU_SUBMIT_TIMEOUT_SECS", "15")?),
            reconnect_attempts: try_load(&lookup, "EMENU_RECONNECT_ATTEMPTS", "5")?,
            reconnect_delay: Duration::from_millis(try_load(&lookup, "EMENU_RECONNECT_DELAY_MS", "1000")?),
            actor_buffer,
        })
    }

    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            max_attempts: self.reconnect_attempts,
            delay: self.reconnect_delay,
        }
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.session_file, PathBuf::from(".emenu/session.json"));
        assert_eq!(config.submit_timeout, Duration::from_secs(15));
        assert_eq!(config.reconnect_policy(), ReconnectPolicy::default());
        assert_eq!(config.actor_buffer, 32);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("EMENU_API_URL", "https://menu.example.com/api/"),
            ("EMENU_SUBMIT_TIMEOUT_SECS", "3"),
            ("EMENU_RECONNECT_ATTEMPTS", "0"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://menu.example.com/api");
        assert_eq!(config.submit_timeout, Duration::from_secs(3));
        assert_eq!(config.reconnect_attempts, 0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = config_from(&[("EMENU_SUBMIT_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "EMENU_SUBMIT_TIMEOUT_SECS", .. }));

        let err = config_from(&[("EMENU_ACTOR_BUFFER", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "EMENU_ACTOR_BUFFER", .. }));
    }
}
