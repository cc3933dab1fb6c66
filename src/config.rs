use std::env;
use std::time::Duration;

use derive_more::Display;

pub const PROXY_URL: &str = "PROXY_URL";

const BIND_ADDRESS: &str = "BIND_ADDRESS";
const ACCESS_TOKEN: &str = "ACCESS_TOKEN";
const CLEANUP_INTERVAL: &str = "CLEANUP_INTERVAL";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_CLEANUP_INTERVAL: u64 = 60;

/// Where the resolver looks up the configured proxy.
///
/// Implementations are queried on every lookup, nothing is cached.
pub trait ConfigSource: Send + Sync {
    fn proxy_url(&self) -> Option<String>;
}

/// Reads `PROXY_URL` from the process environment.
#[derive(Debug, Default)]
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn proxy_url(&self) -> Option<String> {
        env::var(PROXY_URL).ok()
    }
}

#[derive(Debug, Display, PartialEq)]
pub enum ConfigError {
    #[display(fmt = "{} not set", _0)]
    Missing(&'static str),
    #[display(fmt = "{} is invalid: {}", name, message)]
    Invalid { name: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub access_token: String,
    pub cleanup_interval: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address = lookup(BIND_ADDRESS)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned());

        let access_token = lookup(ACCESS_TOKEN)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(ACCESS_TOKEN))?;

        let cleanup_interval = match lookup(CLEANUP_INTERVAL) {
            None => DEFAULT_CLEANUP_INTERVAL,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        name: CLEANUP_INTERVAL,
                        message: "must be greater than zero".into(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: CLEANUP_INTERVAL,
                        message: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            bind_address,
            access_token,
            cleanup_interval: Duration::from_secs(cleanup_interval),
        })
    }
}

/// Fixed value, used where the environment must not leak into the result.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct StaticConfig(pub Option<String>);

#[cfg(test)]
impl ConfigSource for StaticConfig {
    fn proxy_url(&self) -> Option<String> {
        self.0.clone()
    }
}
