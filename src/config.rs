use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_SESSION_FILE, DEFAULT_TIMEOUT_SECS, DEFAULT_UPLOAD_TIMEOUT_SECS,
};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Default per-request timeout in seconds.
    pub timeout: u64,
    /// Timeout applied to multipart uploads, in seconds.
    pub upload_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Location of the durable session file (token + email survive restarts).
    pub session_file: String,
}

impl fmt::Display for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{},\"upload_timeout\":{}}}",
            self.base_url, self.timeout, self.upload_timeout
        )
    }
}

impl fmt::Display for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"session_file\":\"{}\"}}", self.session_file)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"api\":{},\"storage\":{}}}",
            self.api, self.storage
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            api: ApiConfig {
                base_url: get_env_or_default(
                    "FACESWAP_API_BASE_URL",
                    String::from(DEFAULT_BASE_URL),
                ),
                timeout: get_env_or_default("FACESWAP_API_TIMEOUT", DEFAULT_TIMEOUT_SECS),
                upload_timeout: get_env_or_default(
                    "FACESWAP_UPLOAD_TIMEOUT",
                    DEFAULT_UPLOAD_TIMEOUT_SECS,
                ),
            },
            storage: StorageConfig {
                session_file: get_env_or_default(
                    "FACESWAP_SESSION_FILE",
                    String::from(DEFAULT_SESSION_FILE),
                ),
            },
        }
    }
}
