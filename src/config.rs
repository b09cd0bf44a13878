//! Server configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid HOST '{0}': expected an IP address")]
    Host(String),
    #[error("invalid PORT '{0}': expected an integer in 0..=65535")]
    Port(String),
    #[error("invalid MAX_BODY_BYTES '{0}': expected a positive integer")]
    MaxBodyBytes(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory holding the editor bundle, served at `/` when set.
    pub static_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_HOST, port: DEFAULT_PORT, static_dir: None, max_body_bytes: DEFAULT_MAX_BODY_BYTES }
    }
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `HOST`: bind address, default `0.0.0.0`
    /// - `PORT`: default `3001`
    /// - `STATIC_DIR`: editor bundle directory, unset disables static serving
    /// - `MAX_BODY_BYTES`: save payload limit, default 2 MiB
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first variable that fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: parse_host(lookup("HOST").as_deref())?,
            port: parse_port(lookup("PORT").as_deref())?,
            static_dir: parse_static_dir(lookup("STATIC_DIR").as_deref()),
            max_body_bytes: parse_max_body_bytes(lookup("MAX_BODY_BYTES").as_deref())?,
        })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_host(raw: Option<&str>) -> Result<IpAddr, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_HOST),
        Some(other) => other
            .parse()
            .map_err(|_| ConfigError::Host(other.to_owned())),
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(other) => other
            .parse()
            .map_err(|_| ConfigError::Port(other.to_owned())),
    }
}

fn parse_static_dir(raw: Option<&str>) -> Option<PathBuf> {
    raw.map(str::trim)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

fn parse_max_body_bytes(raw: Option<&str>) -> Result<usize, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_MAX_BODY_BYTES),
        Some(other) => match other.parse::<usize>() {
            Ok(0) | Err(_) => Err(ConfigError::MaxBodyBytes(other.to_owned())),
            Ok(n) => Ok(n),
        },
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
