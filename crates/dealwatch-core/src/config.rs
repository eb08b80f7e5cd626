use crate::app_config::{AppConfig, DEFAULT_DEAL_PAGES, DEFAULT_SITE_ORIGIN, DEFAULT_USER_AGENT};
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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let telegram_token = lookup("TELEGRAM_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let log_level = or_default("DEALWATCH_LOG_LEVEL", "info");
    let default_interval_secs = parse_positive_u64("DEFAULT_INTERVAL", "3600")?;
    let request_timeout_secs = parse_positive_u64("DEALWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("DEALWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let site_origin = or_default("DEALWATCH_SITE_ORIGIN", DEFAULT_SITE_ORIGIN)
        .trim_end_matches('/')
        .to_string();
    let deal_pages = match lookup("DEALWATCH_PAGES") {
        Ok(raw) => parse_page_list(&raw)?,
        Err(_) => DEFAULT_DEAL_PAGES.iter().map(ToString::to_string).collect(),
    };

    Ok(AppConfig {
        telegram_token,
        log_level,
        default_interval_secs,
        request_timeout_secs,
        user_agent,
        site_origin,
        deal_pages,
    })
}

/// Split a comma-separated page list, dropping blank entries.
///
/// An override that names no pages at all is rejected rather than silently
/// polling nothing.
fn parse_page_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let pages: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect();

    if pages.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEALWATCH_PAGES".to_string(),
            reason: "no page URLs given".to_string(),
        });
    }
    Ok(pages)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
