//! Layered import settings.
//!
//! Each setting is taken from the first place that has it:
//! command-line flag, environment variable, config file, built-in default.
//! The config file is `~/.config/drupal-jekyll/config.toml` unless
//! `--config` names another one.

use std::fmt;
use std::path::{Path, PathBuf};

use drupal_jekyll_db::{ConnectParams, DEFAULT_CONTENT_TYPES, Driver, QueryOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli_types::ConnectionArgs;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("Missing mandatory option --{0}.")]
    Missing(&'static str),
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid table prefix '{0}': only letters, digits and '_' are allowed")]
    InvalidPrefix(String),
    #[error("No content types given")]
    NoContentTypes,
    #[error("Unknown database driver '{0}': expected mysql or sqlite")]
    UnknownDriver(String),
}

/// TOML config file format.
#[derive(Debug, Default, Deserialize, Serialize)]
struct ConfigFile {
    database: Option<DatabaseSection>,
}

/// The `[database]` table.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct DatabaseSection {
    pub driver: Option<String>,
    pub dbname: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub prefix: Option<String>,
    pub types: Option<Vec<String>>,
}

/// Return the path to the default config file.
pub(crate) fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("drupal-jekyll").join("config.toml"))
}

/// Load the `[database]` table.
///
/// A missing default config file is not an error; a missing file that was
/// named explicitly is.
pub(crate) fn load_config_file(explicit: Option<&Path>) -> Result<DatabaseSection, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(DatabaseSection::default()),
        },
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_config(&contents, &path)
}

fn parse_config(contents: &str, path: &Path) -> Result<DatabaseSection, ConfigError> {
    let file: ConfigFile = toml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(file.database.unwrap_or_default())
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValueSource {
    /// Given on the command line.
    Flag,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// A value together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Setting<T> {
    pub value: Option<T>,
    pub source: ValueSource,
}

impl<T> Setting<T> {
    fn pick(
        flag: Option<T>,
        env: Option<(T, &'static str)>,
        file: Option<T>,
        default: Option<T>,
    ) -> Self {
        if let Some(v) = flag {
            return Self::found(v, ValueSource::Flag);
        }
        if let Some((v, var)) = env {
            return Self::found(v, ValueSource::EnvVar(var));
        }
        if let Some(v) = file {
            return Self::found(v, ValueSource::ConfigFile);
        }
        match default {
            Some(v) => Self::found(v, ValueSource::Default),
            None => Self {
                value: None,
                source: ValueSource::Missing,
            },
        }
    }

    fn found(value: T, source: ValueSource) -> Self {
        Self {
            value: Some(value),
            source,
        }
    }
}

/// All settings before validation.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub driver: Setting<String>,
    pub dbname: Setting<String>,
    pub user: Setting<String>,
    pub password: Setting<String>,
    pub host: Setting<String>,
    pub prefix: Setting<String>,
    pub types: Setting<Vec<String>>,
}

impl Settings {
    /// Merge flags, environment and file values.
    ///
    /// `env` looks up an environment variable; pass `|k| std::env::var(k).ok()`
    /// in production.
    pub(crate) fn resolve(
        args: &ConnectionArgs,
        file: &DatabaseSection,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let var = |name: &'static str| env(name).map(|v| (v, name));
        let list_var = |name: &'static str| env(name).map(|v| (split_list(&v), name));

        Self {
            driver: Setting::pick(
                args.driver.clone(),
                var("DRUPAL_DRIVER"),
                file.driver.clone(),
                Some(Driver::default().to_string()),
            ),
            dbname: Setting::pick(
                args.dbname.clone(),
                var("DRUPAL_DBNAME"),
                file.dbname.clone(),
                None,
            ),
            user: Setting::pick(args.user.clone(), var("DRUPAL_USER"), file.user.clone(), None),
            password: Setting::pick(
                args.password.clone(),
                var("DRUPAL_PASSWORD"),
                file.password.clone(),
                Some(String::new()),
            ),
            host: Setting::pick(
                args.host.clone(),
                var("DRUPAL_HOST"),
                file.host.clone(),
                Some("localhost".to_string()),
            ),
            prefix: Setting::pick(
                args.prefix.clone(),
                var("DRUPAL_PREFIX"),
                file.prefix.clone(),
                Some(String::new()),
            ),
            types: Setting::pick(
                args.types.clone(),
                list_var("DRUPAL_TYPES"),
                file.types.clone(),
                Some(DEFAULT_CONTENT_TYPES.iter().map(|t| t.to_string()).collect()),
            ),
        }
    }

    /// Validate and produce the final configuration.
    pub(crate) fn into_config(self) -> Result<ImportConfig, ConfigError> {
        let driver = match self.driver.value {
            Some(name) => name
                .parse::<Driver>()
                .map_err(|_| ConfigError::UnknownDriver(name.clone()))?,
            None => Driver::default(),
        };
        let dbname = self
            .dbname
            .value
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("dbname"))?;
        let user = self
            .user
            .value
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("user"))?;

        let prefix = self.prefix.value.unwrap_or_default();
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::InvalidPrefix(prefix));
        }

        let types: Vec<String> = self
            .types
            .value
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if types.is_empty() {
            return Err(ConfigError::NoContentTypes);
        }

        Ok(ImportConfig {
            driver,
            dbname,
            user,
            password: self.password.value.unwrap_or_default(),
            host: self.host.value.unwrap_or_else(|| "localhost".to_string()),
            prefix,
            types,
        })
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    pub driver: Driver,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub prefix: String,
    pub types: Vec<String>,
}

impl ImportConfig {
    /// Resolve settings from all layers and validate them. Touches nothing
    /// but the config file.
    pub(crate) fn load(args: &ConnectionArgs, config: Option<&Path>) -> Result<Self, ConfigError> {
        let file = load_config_file(config)?;
        Settings::resolve(args, &file, |k| std::env::var(k).ok()).into_config()
    }

    pub(crate) fn query_options(&self) -> QueryOptions {
        QueryOptions::new(self.prefix.clone(), self.types.clone())
    }

    pub(crate) fn connect_params(&self) -> ConnectParams {
        ConnectParams {
            driver: self.driver,
            dbname: self.dbname.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            host: self.host.clone(),
        }
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Mask a secret for display, keeping the first two characters.
pub(crate) fn mask_value(s: &str) -> String {
    if s.is_empty() {
        String::new()
    } else if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        let head: String = s.chars().take(2).collect();
        format!("{}****", head)
    }
}
