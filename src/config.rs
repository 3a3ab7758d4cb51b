use std::{env, fmt, time::Duration};
use tracing::Level;

/// Geolocation endpoint used when `IP2LOCATION_ENDPOINT` is unset.
pub const DEFAULT_ENDPOINT: &str = "https://api.ip2location.io/";

/// Prefix of the maps link printed under each report.
pub const MAPS_BASE_URL: &str = "http://googleusercontent.com/maps.google.com";

const API_KEY_VAR: &str = "IP2LOCATION_API_KEY";
const ENDPOINT_VAR: &str = "IP2LOCATION_ENDPOINT";
const LOG_VAR: &str = "IP_TRACKER_LOG";

/// Per-character delay of the status lines on an interactive terminal.
const TYPING_DELAY: Duration = Duration::from_millis(15);

/// Runtime settings, resolved once at startup.
#[derive(Clone)]
pub struct Settings {
  pub api_key: Option<String>,
  pub endpoint: String,
  pub maps_base: String,
  pub log_level: Level,
  pub typing_delay: Duration,
}

impl Settings {
  /// Reads settings from the process environment.
  #[must_use]
  pub fn from_env() -> Self {
    let mut settings = Self::from_lookup(|name| env::var(name).ok());
    if console::Term::stdout().is_term() {
      settings.typing_delay = TYPING_DELAY;
    }
    settings
  }

  /// Builds settings from an arbitrary variable source.
  pub fn from_lookup<F>(get: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_empty = |name: &str| {
      get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    };

    Self {
      api_key: non_empty(API_KEY_VAR),
      endpoint: non_empty(ENDPOINT_VAR)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
      maps_base: MAPS_BASE_URL.to_string(),
      log_level: non_empty(LOG_VAR)
        .and_then(|v| v.parse().ok())
        .unwrap_or(Level::WARN),
      typing_delay: Duration::ZERO,
    }
  }
}

impl Default for Settings {
  fn default() -> Self {
    Self::from_lookup(|_| None)
  }
}

impl fmt::Debug for Settings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Settings")
      .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
      .field("endpoint", &self.endpoint)
      .field("maps_base", &self.maps_base)
      .field("log_level", &self.log_level)
      .field("typing_delay", &self.typing_delay)
      .finish()
  }
}
