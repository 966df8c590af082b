//! Process configuration resolved once at startup.

use std::env;

use tracing::warn;

/// Address the server listens on when `LISTEN_ADDR` is not set.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:9000";

/// Configuration for one server process.
///
/// Resolved from the environment exactly once and passed explicitly into the
/// handlers via the context; nothing reads the environment per request.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind.
    pub listen_addr: String,
    /// OpenWeatherMap credential. `None` switches the weather route to its
    /// fixed mock payload; this is not an error.
    pub weather_api_key: Option<String>,
}

impl Config {
    /// Reads `LISTEN_ADDR` and `OPENWEATHER_API_KEY` from the environment.
    ///
    /// An absent or empty credential is logged once as a warning and treated
    /// as "serve mock weather data".
    pub fn from_env() -> Self {
        let weather_api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        if weather_api_key.is_none() {
            warn!("OPENWEATHER_API_KEY is not set; the weather route will serve mock data");
        }

        let listen_addr = env::var("LISTEN_ADDR")
            .ok()
            .filter(|addr| !addr.is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());

        Self {
            listen_addr,
            weather_api_key,
        }
    }

    /// A configuration with no credential, listening on the default address.
    pub fn mock() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            weather_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_config_has_no_credential() {
        let config = Config::mock();
        assert!(config.weather_api_key.is_none());
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
    }
}
