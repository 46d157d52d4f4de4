use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, info};

use super::ClientConfig;
use crate::error::ConfigError;

pub const ENV_API_URL: &str = "CONTRIB_API_URL";
pub const ENV_API_TOKEN: &str = "CONTRIB_API_TOKEN";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "CONTRIB_REQUEST_TIMEOUT_MS";
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "CONTRIB_SEARCH_DEBOUNCE_MS";
pub const ENV_PAGE_LIMIT: &str = "CONTRIB_PAGE_LIMIT";

pub(super) fn load<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ClientConfig::default();

    let base_url = var(&lookup, ENV_API_URL).unwrap_or_else(|| {
        info!("{} not set, using default: {}", ENV_API_URL, defaults.base_url);
        defaults.base_url.clone()
    });

    let bearer_token = var(&lookup, ENV_API_TOKEN);

    let request_timeout = parse::<u64, _>(&lookup, ENV_REQUEST_TIMEOUT_MS)?
        .map(Duration::from_millis)
        .unwrap_or(defaults.request_timeout);

    let search_debounce = parse::<u64, _>(&lookup, ENV_SEARCH_DEBOUNCE_MS)?
        .map(Duration::from_millis)
        .unwrap_or(defaults.search_debounce);

    let page_limit = parse::<u32, _>(&lookup, ENV_PAGE_LIMIT)?;

    let config = ClientConfig {
        base_url,
        bearer_token,
        request_timeout,
        search_debounce,
        page_limit,
    };
    config.validate()?;
    Ok(config)
}

fn var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    if value.is_none() {
        debug!("environment variable {} not set", key);
    }
    value
}

fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match var(lookup, key) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
