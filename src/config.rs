//! Application configuration.
//!
//! Settings come from the process environment. A `.env` file in the working
//! directory is loaded first when present. Every setting except the API key
//! uses the `TASKCHAT_` prefix, e.g. `TASKCHAT_DATABASE_PATH`.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Prefix for environment variables read into [`AppConfig`].
pub const ENV_PREFIX: &str = "TASKCHAT";

/// Environment variable holding the completion service credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Log levels accepted by `TASKCHAT_LOG_LEVEL`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Credential for the completion service. `None` disables the AI fallback.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Model used for fallback replies.
    #[serde(default = "default_model")]
    pub openai_model: String,

    /// Minimum level for log output.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File to append logs to. `None` logs to stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Task database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// User preferences file.
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,

    /// Directory holding the web frontend.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/tasks.db")
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("data/preferences.yaml")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: default_model(),
            log_level: default_log_level(),
            log_file: None,
            database_path: default_database_path(),
            preferences_path: default_preferences_path(),
            static_dir: default_static_dir(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable has the wrong type (e.g. a non-numeric port).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Load configuration from an explicit set of variables.
    ///
    /// `PORT` is honoured when `TASKCHAT_PORT` is absent. A blank API key is
    /// treated as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable has the wrong type.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let api_key = vars.get(API_KEY_VAR).filter(|key| !key.trim().is_empty()).cloned();
        let fallback_port = vars.get("PORT").cloned();
        let source: config::Map<String, String> = vars.into_iter().collect();

        let mut builder = config::Config::builder().set_override_option("openai_api_key", api_key)?;
        if let Some(port) = fallback_port {
            builder = builder.set_default("port", port)?;
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(Some(source)))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Check the configuration, returning one message per problem.
    ///
    /// An empty list means the configuration is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.openai_api_key.is_none() {
            errors.push(format!("{API_KEY_VAR} is not set"));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "{ENV_PREFIX}_LOG_LEVEL must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }
        if self.database_path.as_os_str().is_empty() {
            errors.push(format!("{ENV_PREFIX}_DATABASE_PATH must not be empty"));
        }
        if self.preferences_path.as_os_str().is_empty() {
            errors.push(format!("{ENV_PREFIX}_PREFERENCES_PATH must not be empty"));
        }

        errors
    }

    /// Validate the configuration, failing with every problem found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] listing each problem.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(errors))
        }
    }

    /// The `host:port` address for the HTTP server.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load variables from a `.env` file into the process environment.
///
/// Existing variables are not overwritten. Returns `false` if the file does
/// not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load_dotenv(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(Error::Config(vec![format!("failed to load {}: {err}", path.display())])),
    }
}
