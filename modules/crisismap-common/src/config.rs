use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables. Every knob
/// has a default so a bare environment runs against the public Nominatim
/// instance at its documented one-request-per-second ceiling.
#[derive(Debug, Clone)]
pub struct Config {
    // Geocoding
    pub nominatim_base_url: String,
    pub nominatim_user_agent: String,
    pub geocode_interval: Duration,
    pub geocode_timeout: Duration,

    // Pipeline
    pub concurrency: usize,
    pub top_locations: usize,
    pub max_results: u32,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if a numeric var does not parse.
    pub fn from_env() -> Self {
        Self {
            nominatim_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            nominatim_user_agent: env::var("NOMINATIM_USER_AGENT")
                .unwrap_or_else(|_| "crisismap".to_string()),
            geocode_interval: Duration::from_millis(parsed_env("GEOCODE_INTERVAL_MS", 1000)),
            geocode_timeout: Duration::from_millis(parsed_env("GEOCODE_TIMEOUT_MS", 10_000)),
            concurrency: parsed_env("PIPELINE_CONCURRENCY", 4) as usize,
            top_locations: parsed_env("TOP_LOCATIONS", 4) as usize,
            max_results: parsed_env("MAX_RESULTS", 100) as u32,
        }
    }
}

fn parsed_env(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a number, got '{raw}'")),
        Err(_) => default,
    }
}
