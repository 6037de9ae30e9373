use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("PCHUNTER_ENV", "development"));
    let log_level = or_default("PCHUNTER_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "PCHUNTER_CATALOG_PATH",
        "./config/catalog.yaml",
    ));

    let navigation_timeout_secs = parse_u64("PCHUNTER_NAVIGATION_TIMEOUT_SECS", "30")?;
    let content_wait_secs = parse_u64("PCHUNTER_CONTENT_WAIT_SECS", "15")?;
    let user_agent = optional("PCHUNTER_USER_AGENT");

    let max_concurrent_sessions = parse_usize("PCHUNTER_MAX_CONCURRENT_SESSIONS", "4")?;
    if max_concurrent_sessions == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PCHUNTER_MAX_CONCURRENT_SESSIONS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let scan_listing_limit = parse_usize("PCHUNTER_SCAN_LISTING_LIMIT", "10")?;

    let classifieds_url = or_default("PCHUNTER_CLASSIFIEDS_URL", "https://www.ouedkniss.com");
    let marketplace_url = or_default("PCHUNTER_MARKETPLACE_URL", "https://www.facebook.com");
    let marketplace_location = or_default("PCHUNTER_MARKETPLACE_LOCATION", "algiers");
    let marketplace_cookie = optional("PCHUNTER_MARKETPLACE_COOKIE");
    let retailer_a_url = or_default("PCHUNTER_RETAILER_A_URL", "https://koubacomputer.store");
    let retailer_b_url = or_default("PCHUNTER_RETAILER_B_URL", "https://digitecdz.com");

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        navigation_timeout_secs,
        content_wait_secs,
        user_agent,
        max_concurrent_sessions,
        scan_listing_limit,
        classifieds_url,
        marketplace_url,
        marketplace_location,
        marketplace_cookie,
        retailer_a_url,
        retailer_b_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
