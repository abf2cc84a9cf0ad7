use std::env;
use std::path::PathBuf;
use std::time::Duration;

use flight_data::DEFAULT_TIMEOUT;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "./resources/www/";
pub const DEFAULT_AIRPORTS_JSON: &str = "./resources/airports.json";

/// Server settings read from the environment at startup. Provider credentials
/// are read by the providers themselves.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub static_dir: PathBuf,
    pub airports_json: PathBuf,
    /// Bound for each outbound call and for each provider's whole lookup.
    pub provider_timeout: Duration,
    /// Adds the built-in flight data set as last provider.
    pub mock_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            airports_json: PathBuf::from(DEFAULT_AIRPORTS_JSON),
            provider_timeout: DEFAULT_TIMEOUT,
            mock_data: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env::var("WEB_BIND_ADDRESS").unwrap_or(defaults.bind_address),
            static_dir: env::var("WEB_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            airports_json: env::var("AIRPORTS_JSON")
                .map(PathBuf::from)
                .unwrap_or(defaults.airports_json),
            provider_timeout: env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|secs| parse_timeout(&secs))
                .unwrap_or(defaults.provider_timeout),
            mock_data: env::var("FLIGHTS_MOCK_DATA")
                .map(|value| parse_flag(&value))
                .unwrap_or(defaults.mock_data),
        }
    }
}

fn parse_timeout(secs: &str) -> Option<Duration> {
    match secs.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            log::warn!("Ignoring invalid PROVIDER_TIMEOUT_SECS '{secs}'.");
            None
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn timeouts() {
        assert_eq!(parse_timeout("3"), Some(Duration::from_secs(3)));
        assert_eq!(parse_timeout("0"), None);
        assert_eq!(parse_timeout("soon"), None);
    }
}
