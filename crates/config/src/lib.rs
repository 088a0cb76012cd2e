//! Layered configuration for lantern.
//!
//! Sources are merged in order, later sources winning:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. A TOML file: either the one passed explicitly, or `lantern.toml` in the
//!    platform configuration directory if it exists.
//! 3. Environment variables prefixed with `LANTERN_`, using `__` to separate
//!    nested keys (e.g. `LANTERN_SERVER__BIND=0.0.0.0:8080`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "LANTERN_";
const CONFIG_FILE: &str = "lantern.toml";
const DATABASE_FILE: &str = "catalog.sqlite3";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "lantern", "lantern")
}

/// Location of the configuration file used when none is given explicitly.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub instance: InstanceConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite content catalog.
    pub path: PathBuf,
}
impl Default for DatabaseConfig {
    fn default() -> Self {
        let path = project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE));
        Self { path }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}
impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)) }
    }
}

/// Identity facts reported by the capability endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Stable identifier of this installation. Generated at startup if unset.
    pub id: Option<String>,
    /// Human-readable device name. Falls back to the OS hostname if unset.
    pub device_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            instance: InstanceConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Build the layered figment without extracting it.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let file = match path {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "Merging configuration file");
            figment = figment.merge(Toml::file(file));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load configuration from every source.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?.extract().or_raise(|| ErrorKind::Load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.instance, InstanceConfig::default());
        assert!(config.database.path.ends_with(DATABASE_FILE));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(path) if path.ends_with("nope.toml")));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
                [database]
                path = "/srv/lantern/catalog.sqlite3"

                [instance]
                device_name = "classroom-pi"
            "#
        )
        .unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/srv/lantern/catalog.sqlite3"));
        assert_eq!(config.instance.device_name.as_deref(), Some("classroom-pi"));
        assert_eq!(config.instance.id, None);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_invalid_values_fail_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind = \"not an address\"").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Load));
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "lantern.toml",
                r#"
                    [server]
                    bind = "127.0.0.1:9000"

                    [log]
                    filter = "debug"
                "#,
            )?;
            jail.set_env("LANTERN_SERVER__BIND", "0.0.0.0:8443");
            jail.set_env("LANTERN_INSTANCE__ID", "0123456789abcdef0123456789abcdef");
            let config = Config::load(Some(Path::new("lantern.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.server.bind, "0.0.0.0:8443".parse().unwrap());
            assert_eq!(config.log.filter, "debug");
            assert_eq!(config.instance.id.as_deref(), Some("0123456789abcdef0123456789abcdef"));
            Ok(())
        });
    }
}
