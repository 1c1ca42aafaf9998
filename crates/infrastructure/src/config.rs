//! Client configuration.
//!
//! Values come from `GHKIT_*` environment variables by default:
//!
//! | Variable           | Field        | Notes                              |
//! |--------------------|--------------|------------------------------------|
//! | `GHKIT_API_URL`    | `api_url`    | required                           |
//! | `GHKIT_CLIENT_ID`  | `client_id`  | required                           |
//! | `GHKIT_SCOPES`     | `scopes`     | space separated, optional          |
//! | `GHKIT_TOKEN_PATH` | `token_path` | defaults to `<config dir>/ghkit/token` |

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use ghkit_domain::{ApiBase, DomainError};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GHKIT";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong shape.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// The API URL is not a usable base URL.
    #[error("invalid API URL: {0}")]
    ApiUrl(#[from] DomainError),

    /// The client id is empty.
    #[error("client_id must not be empty")]
    EmptyClientId,

    /// No token path was given and the platform has no config directory.
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Settings a host needs to talk to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL.
    pub api_url: ApiBase,
    /// OAuth application client id.
    pub client_id: String,
    /// Extra scopes requested at login, after the base scopes.
    pub scopes: Vec<String>,
    /// Where the token file lives.
    pub token_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_url: String,
    client_id: String,
    #[serde(default)]
    scopes: Option<Scopes>,
    #[serde(default)]
    token_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scopes {
    List(Vec<String>),
    Joined(String),
}

impl Scopes {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(list) => list,
            Self::Joined(joined) => joined.split_whitespace().map(str::to_string).collect(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `GHKIT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Config::builder().add_source(Environment::with_prefix(ENV_PREFIX)))
    }

    /// Loads configuration from a file (any format the `config` crate
    /// recognizes by extension), with `GHKIT_*` variables taking precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a required value is
    /// missing or invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(
            Config::builder()
                .add_source(File::from(path))
                .add_source(Environment::with_prefix(ENV_PREFIX)),
        )
    }

    /// Loads configuration from the sources already added to `builder`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or invalid.
    pub fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let raw: RawConfig = builder.build()?.try_deserialize()?;
        if raw.client_id.trim().is_empty() {
            return Err(ConfigError::EmptyClientId);
        }

        let token_path = match raw.token_path {
            Some(path) => path,
            None => default_token_path().ok_or(ConfigError::NoConfigDir)?,
        };

        Ok(Self {
            api_url: ApiBase::parse(&raw.api_url)?,
            client_id: raw.client_id,
            scopes: raw.scopes.map(Scopes::into_vec).unwrap_or_default(),
            token_path,
        })
    }
}

/// `<config dir>/ghkit/token`, if the platform has a config directory.
#[must_use]
pub fn default_token_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ghkit").join("token"))
}
