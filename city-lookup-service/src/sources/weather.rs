use serde::Deserialize;

use super::UpstreamClient;
use crate::error::UpstreamError;
use crate::models::Weather;

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m,relative_humidity_2m";

#[derive(Debug, Deserialize)]
struct Forecast {
    current: Option<Weather>,
}

impl UpstreamClient {
    /// Current conditions, in Fahrenheit and mph
    pub async fn current_weather(&self, lat: f64, lon: f64) -> Result<Option<Weather>, UpstreamError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={}&temperature_unit=fahrenheit&wind_speed_unit=mph",
            self.config().endpoints.weather_url,
            lat,
            lon,
            CURRENT_FIELDS
        );

        let forecast: Forecast = self.get_json(&url).await?;
        Ok(forecast.current)
    }
}
