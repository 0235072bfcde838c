use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::model::StorageType;


const DEFAULT_DATABASE_URL: &str = "sqlite://feedback.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_VERIFIER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const MAX_LEEWAY_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration `{0}`")]
    Missing(&'static str),
    #[error("Invalid configuration `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

pub struct FeedbackConfig {
    pub verifier: VerifierConfig,
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub http: HttpConfig,
}

pub struct VerifierConfig {
    pub url: Url,
    /// Homeserver name sent to the verifier with every credential.
    pub server_name: String,
    pub auth_token: Option<Zeroizing<String>>,
    pub timeout: Duration,
}

pub struct SessionConfig {
    pub signing_secret: Zeroizing<Vec<u8>>,
    /// Allowed clock skew in seconds.
    pub leeway: u64,
}

pub struct StorageConfig {
    pub storage_type: StorageType,
    pub database_url: String,
    pub max_connections: u32,
    pub timeout: Duration,
}

pub struct HttpConfig {
    pub bind_address: String,
}

impl FeedbackConfig {
    /// Reads the configuration from the process environment after loading a `.env` file, if any.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &'static str| lookup(name).filter(|value| !value.is_empty());
        let required = |name: &'static str| value(name).ok_or(ConfigError::Missing(name));

        let leeway = parse_or("JWT_LEEWAY_SECS", value("JWT_LEEWAY_SECS"), 0)?;
        if leeway > MAX_LEEWAY_SECS {
            return Err(ConfigError::Invalid {
                name: "JWT_LEEWAY_SECS",
                reason: format!("must not exceed {MAX_LEEWAY_SECS} seconds"),
            });
        }

        let url = required("OIDC_VALIDATION_URL")?;
        let url = Url::parse(&url).map_err(|e| ConfigError::Invalid {
            name: "OIDC_VALIDATION_URL",
            reason: e.to_string(),
        })?;

        Ok(Self {
            verifier: VerifierConfig {
                url,
                server_name: required("MATRIX_SERVER_NAME")?,
                auth_token: value("UVS_AUTH_TOKEN").map(Zeroizing::new),
                timeout: Duration::from_secs(parse_or(
                    "VERIFIER_TIMEOUT_SECS",
                    value("VERIFIER_TIMEOUT_SECS"),
                    DEFAULT_VERIFIER_TIMEOUT_SECS,
                )?),
            },
            session: SessionConfig {
                signing_secret: Zeroizing::new(required("JWT_SIGNATURE")?.into_bytes()),
                leeway,
            },
            storage: StorageConfig {
                storage_type: parse_or("STORAGE_TYPE", value("STORAGE_TYPE"), StorageType::Sqlite)?,
                database_url: value("DATABASE_URL")
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
                max_connections: parse_or(
                    "DB_MAX_CONNECTIONS",
                    value("DB_MAX_CONNECTIONS"),
                    DEFAULT_MAX_CONNECTIONS,
                )?,
                timeout: Duration::from_secs(parse_or(
                    "STORE_TIMEOUT_SECS",
                    value("STORE_TIMEOUT_SECS"),
                    DEFAULT_STORE_TIMEOUT_SECS,
                )?),
            },
            http: HttpConfig {
                bind_address: value("BIND_ADDRESS")
                    .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned()),
            },
        })
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}
