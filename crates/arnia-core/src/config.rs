//! Configuration module
//!
//! Env-var driven configuration for the uploader. The service-account
//! credentials are backend contract values; they are injected here rather
//! than embedded in source.

use std::env;
use std::path::PathBuf;

use crate::error::AppError;

const DEFAULT_ENDPOINT: &str = "https://apisferoweb.it/api/v4/APIUploadImage";
const DEFAULT_GPS: &str = "0.0,0.0";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SCALE: f64 = 1.0;

/// Uploader configuration, loaded from the environment.
#[derive(Clone, Debug)]
pub struct UploaderConfig {
    /// Upload endpoint URL.
    pub endpoint: String,
    /// Service-account username sent as the `username` form field.
    pub username: String,
    /// Service-account password sent as the `password` form field.
    pub password: String,
    /// Fixed `lat,lon` pair sent as the `GPS` form field.
    pub gps: String,
    /// Request timeout for the single upload attempt.
    pub timeout_secs: u64,
    /// Directory for resolver cache copies of indirect references.
    pub cache_dir: PathBuf,
    /// Default hive id used to prefill the upload context.
    pub default_arnia_id: Option<String>,
    /// Default scale factor used to prefill the upload context.
    pub default_scale: f64,
}

impl UploaderConfig {
    /// Load configuration from the environment.
    ///
    /// `SFEROWEB_USERNAME` and `SFEROWEB_PASSWORD` are required; everything
    /// else has a default.
    pub fn from_env() -> Result<Self, AppError> {
        let username = require_env("SFEROWEB_USERNAME")?;
        let password = require_env("SFEROWEB_PASSWORD")?;

        let endpoint =
            env::var("SFEROWEB_UPLOAD_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let gps = env::var("SFEROWEB_GPS").unwrap_or_else(|_| DEFAULT_GPS.to_string());

        let timeout_secs = match env::var("SFEROWEB_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::InvalidInput(format!("SFEROWEB_TIMEOUT_SECS must be an integer: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let cache_dir = env::var("SFEROWEB_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("arnia-cache"));

        let default_arnia_id = env::var("SFEROWEB_ARNIA_ID")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let default_scale = match env::var("SFEROWEB_SCALE") {
            Ok(raw) => {
                let parsed: f64 = raw.parse().map_err(|_| {
                    AppError::InvalidInput(format!("SFEROWEB_SCALE must be a number: {}", raw))
                })?;
                if !(parsed.is_finite() && parsed > 0.0) {
                    return Err(AppError::InvalidInput(format!(
                        "SFEROWEB_SCALE must be positive: {}",
                        raw
                    )));
                }
                parsed
            }
            Err(_) => DEFAULT_SCALE,
        };

        Ok(Self {
            endpoint,
            username,
            password,
            gps,
            timeout_secs,
            cache_dir,
            default_arnia_id,
            default_scale,
        })
    }
}

fn require_env(key: &str) -> Result<String, AppError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput(format!("Missing required env var: {}", key)))
}
