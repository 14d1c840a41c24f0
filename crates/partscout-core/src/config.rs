use std::path::PathBuf;

use crate::app_config::{AppConfig, DEFAULT_USER_AGENT};
use crate::error::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var carries an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var carries an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let stores_path = PathBuf::from(or_default("PARTSCOUT_STORES_PATH", "./config/stores.yaml"));
    let log_level = or_default("PARTSCOUT_LOG_LEVEL", "info");
    let user_agent = or_default("PARTSCOUT_USER_AGENT", DEFAULT_USER_AGENT);

    let http_timeout_secs = parse_u64("PARTSCOUT_HTTP_TIMEOUT_SECS", "30")?;
    let browser_timeout_secs = parse_u64("PARTSCOUT_BROWSER_TIMEOUT_SECS", "60")?;
    let request_delay_ms = parse_u64("PARTSCOUT_REQUEST_DELAY_MS", "250")?;

    let meli_site_id = or_default("PARTSCOUT_MELI_SITE", "MLC");
    let chromium_path = lookup("PARTSCOUT_CHROMIUM_PATH").ok().map(PathBuf::from);
    let snapshot_dir = lookup("PARTSCOUT_SNAPSHOT_DIR").ok().map(PathBuf::from);

    Ok(AppConfig {
        stores_path,
        log_level,
        user_agent,
        http_timeout_secs,
        browser_timeout_secs,
        request_delay_ms,
        meli_site_id,
        chromium_path,
        snapshot_dir,
    })
}
