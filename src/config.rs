//! Server configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default listening port
const DEFAULT_PORT: u16 = 8000;

/// Candidate build output directories, relative to the working directory.
const ASSET_DIR_CANDIDATES: &[&str] = &["app/dist", "../app/dist", "assets", "../assets"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub assets_dir: PathBuf,
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `SKYWARD_ASSETS_DIR` (optional) — widget build output; located
    ///   relative to the working directory when unset
    /// - `SKYWARD_HOST` (optional, default `0.0.0.0`)
    /// - `SKYWARD_PORT` (optional, default 8000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let assets_dir = match lookup("SKYWARD_ASSETS_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                locate_assets_directory(&current_dir)
            }
        };

        let host = match lookup("SKYWARD_HOST") {
            Some(value) => value.parse::<IpAddr>().map_err(|_| ConfigError::Invalid {
                var: "SKYWARD_HOST",
                expected: "an IP address",
                value,
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup("SKYWARD_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "SKYWARD_PORT",
                expected: "a port number",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            assets_dir,
            addr: SocketAddr::new(host, port),
        })
    }
}

/// First existing candidate under `current_dir`, else the relative `app/dist`.
fn locate_assets_directory(current_dir: &Path) -> PathBuf {
    ASSET_DIR_CANDIDATES
        .iter()
        .map(|candidate| current_dir.join(candidate))
        .find(|path| path.is_dir())
        .unwrap_or_else(|| PathBuf::from(ASSET_DIR_CANDIDATES[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn explicit_values_win() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("SKYWARD_ASSETS_DIR", "/srv/dist"),
            ("SKYWARD_HOST", "127.0.0.1"),
            ("SKYWARD_PORT", "9100"),
        ]))
        .unwrap();

        assert_eq!(config.assets_dir, PathBuf::from("/srv/dist"));
        assert_eq!(config.addr, "127.0.0.1:9100".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn defaults_to_port_8000_on_all_interfaces() {
        let config = ServerConfig::from_lookup(lookup(&[("SKYWARD_ASSETS_DIR", "dist")])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup(&[("SKYWARD_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "SKYWARD_PORT",
                expected: "a port number",
                value: "eighty".into(),
            }
        );
    }

    #[test]
    fn locates_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();
        assert_eq!(locate_assets_directory(dir.path()), dir.path().join("assets"));

        std::fs::create_dir_all(dir.path().join("app/dist")).unwrap();
        assert_eq!(locate_assets_directory(dir.path()), dir.path().join("app/dist"));
    }
}
