use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_TIME_URL: &str = "https://timeapi.io/api/time/current/coordinate";
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";
pub const DEFAULT_NEWS_URL: &str = "https://news.google.com/rss/search";
pub const DEFAULT_PLACES_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_USER_AGENT: &str = "WorldClockGreetingApp/1.0";

/// Command-line and environment configuration for the lookup service
#[derive(Parser, Debug, Clone)]
#[command(name = "city-lookup-service")]
#[command(about = "Aggregates time, weather, air quality, news and restaurants for a city")]
#[command(version)]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Directory of front-end assets served at the site root, skipped if missing
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    /// Song/locale catalog to use instead of the embedded one
    #[arg(long = "catalog", env = "SONG_CATALOG")]
    pub catalog_path: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    #[command(flatten)]
    pub upstream: UpstreamConfig,
}

/// Settings shared by every outbound call
#[derive(clap::Args, Debug, Clone)]
pub struct UpstreamConfig {
    /// Per-call timeout, in seconds
    #[arg(long = "upstream-timeout-secs", env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 8, value_parser = parse_timeout)]
    pub timeout_secs: u64,

    /// Client identifier sent with every request (required by Nominatim's usage policy)
    #[arg(long, env = "LOOKUP_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Search radius for nearby restaurants, in meters
    #[arg(long = "restaurant-radius", env = "RESTAURANT_RADIUS_METERS", default_value_t = 1500)]
    pub restaurant_radius_m: u32,

    /// Maximum number of restaurants returned
    #[arg(long, env = "RESTAURANT_LIMIT", default_value_t = 10)]
    pub restaurant_limit: usize,

    #[command(flatten)]
    pub endpoints: Endpoints,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 8,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            restaurant_radius_m: 1500,
            restaurant_limit: 10,
            endpoints: Endpoints::default(),
        }
    }
}

/// Full URLs of the third-party services
#[derive(clap::Args, Debug, Clone)]
pub struct Endpoints {
    #[arg(long, env = "GEOCODER_URL", default_value = DEFAULT_GEOCODER_URL)]
    pub geocoder_url: String,

    #[arg(long, env = "TIME_URL", default_value = DEFAULT_TIME_URL)]
    pub time_url: String,

    #[arg(long, env = "WEATHER_URL", default_value = DEFAULT_WEATHER_URL)]
    pub weather_url: String,

    #[arg(long, env = "AIR_QUALITY_URL", default_value = DEFAULT_AIR_QUALITY_URL)]
    pub air_quality_url: String,

    #[arg(long, env = "NEWS_URL", default_value = DEFAULT_NEWS_URL)]
    pub news_url: String,

    #[arg(long, env = "PLACES_URL", default_value = DEFAULT_PLACES_URL)]
    pub places_url: String,
}

impl Endpoints {
    /// Every endpoint under one base URL, using the paths of the public providers.
    /// Handy for mirrors and local fakes.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            geocoder_url: format!("{}/search", base),
            time_url: format!("{}/api/time/current/coordinate", base),
            weather_url: format!("{}/v1/forecast", base),
            air_quality_url: format!("{}/v1/air-quality", base),
            news_url: format!("{}/rss/search", base),
            places_url: format!("{}/api/interpreter", base),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            time_url: DEFAULT_TIME_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.to_string(),
            news_url: DEFAULT_NEWS_URL.to_string(),
            places_url: DEFAULT_PLACES_URL.to_string(),
        }
    }
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    let secs: u64 = s.parse().map_err(|e| format!("invalid timeout: {}", e))?;
    if secs == 0 {
        return Err("timeout must be at least one second".to_string());
    }
    Ok(secs)
}
