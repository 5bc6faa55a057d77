//! Uplink credential loading
//!
//! The signing triple is read once at process start from the environment.
//! Credentials never appear in the station file.

use std::env;

use contracts::{TelemetryError, UplinkCredentials};

/// Load the credential triple from the environment
///
/// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_REGION` and
/// optionally `AWS_SESSION_TOKEN`.
///
/// # Errors
/// A missing or empty required variable.
pub fn credentials_from_env() -> Result<UplinkCredentials, TelemetryError> {
    Ok(UplinkCredentials {
        access_key_id: required_env("AWS_ACCESS_KEY_ID")?,
        secret_access_key: required_env("AWS_SECRET_ACCESS_KEY")?,
        session_token: optional_env("AWS_SESSION_TOKEN"),
        region: required_env("AWS_REGION")?,
    })
}

fn required_env(key: &str) -> Result<String, TelemetryError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(TelemetryError::credentials(format!(
            "missing env var {key}"
        ))),
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
