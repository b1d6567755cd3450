//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration only: where the database lives, which address to
//! bind and how verbose to log. Everything is resolved once at startup.
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`FYYUR_ROOT_FOLDER`)
//! 3. TOML config file (`root_folder`)
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable consulted for the root folder
pub const ROOT_FOLDER_ENV: &str = "FYYUR_ROOT_FOLDER";

/// Database file created inside the root folder
pub const DATABASE_FILE_NAME: &str = "fyyur.db";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional in the file; a missing file yields the defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Folder holding the database (and any future data files)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Explicit database file, overrides `<root_folder>/fyyur.db`
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level or full `EnvFilter` directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            database_path: None,
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load configuration from a file, logging the outcome
    ///
    /// A missing file is not fatal: a warning is logged and defaults are
    /// returned. An unreadable or malformed file is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let (config, source) = Self::read(path)?;
        source.log();
        Ok(config)
    }

    /// Load from `path` if given, else from the platform config location
    ///
    /// Nothing is logged; the returned [`ConfigSource`] says what happened so
    /// the caller can report it once logging is set up.
    pub fn load_or_default(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        match path {
            Some(path) => Self::read(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok((Self::default(), ConfigSource::Defaults)),
            },
        }
    }

    fn read(path: &Path) -> Result<(Self, ConfigSource)> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::parse(&content).map_err(|e| {
                    Error::Config(format!("{} ({})", e, path.display()))
                })?;
                Ok((config, ConfigSource::File(path.to_path_buf())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok((Self::default(), ConfigSource::Missing(path.to_path_buf())))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// Where a loaded [`TomlConfig`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The named file does not exist; built-in defaults apply
    Missing(PathBuf),
    /// No file named and none at the platform location
    Defaults,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing(path) => warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            ),
            ConfigSource::Defaults => info!("No config file, using built-in defaults"),
        }
    }
}

/// Platform config file location (`~/.config/fyyur/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"))
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data"))
}

/// Resolves the root folder following the documented priority order
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    env_var_name: String,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new() -> Self {
        Self {
            cli_arg: None,
            env_var_name: ROOT_FOLDER_ENV.to_string(),
            toml_root: None,
        }
    }

    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var_name = name.into();
        self
    }

    pub fn with_toml(mut self, config: &TomlConfig) -> Self {
        self.toml_root = config.root_folder.clone();
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(&self.env_var_name) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            return path.clone();
        }

        default_root_folder()
    }
}

impl Default for RootFolderResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Fully resolved bootstrap settings for the web service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServiceConfig {
    /// Combine CLI overrides with the TOML file
    ///
    /// `database` and `port` from the command line win over the file.
    pub fn resolve(
        toml: &TomlConfig,
        root_folder: Option<PathBuf>,
        database: Option<PathBuf>,
        port: Option<u16>,
    ) -> Self {
        let root_folder = RootFolderResolver::new()
            .with_cli_arg(root_folder)
            .with_toml(toml)
            .resolve();

        let database_path = database
            .or_else(|| toml.database_path.clone())
            .unwrap_or_else(|| root_folder.join(DATABASE_FILE_NAME));

        Self {
            root_folder,
            database_path,
            host: toml.host.clone(),
            port: port.unwrap_or(toml.port),
            log_level: toml.logging.level.clone(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
