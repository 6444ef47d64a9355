use serde::Deserialize;

use super::UpstreamClient;
use crate::error::UpstreamError;
use crate::models::AirQuality;

#[derive(Debug, Deserialize)]
struct AirQualityReport {
    current: Option<AirQuality>,
}

impl UpstreamClient {
    pub async fn current_air_quality(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Option<AirQuality>, UpstreamError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current=us_aqi,pm10,pm2_5",
            self.config().endpoints.air_quality_url,
            lat,
            lon
        );

        let report: AirQualityReport = self.get_json(&url).await?;
        Ok(report.current)
    }
}
