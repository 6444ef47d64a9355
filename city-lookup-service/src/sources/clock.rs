use serde::Deserialize;

use super::UpstreamClient;
use crate::error::UpstreamError;

#[derive(Debug, Deserialize)]
struct CurrentTime {
    #[serde(rename = "timeZone")]
    time_zone: Option<String>,
}

impl UpstreamClient {
    /// IANA time zone name at the coordinate, if the service reports one
    pub async fn time_zone(&self, lat: f64, lon: f64) -> Result<Option<String>, UpstreamError> {
        let url = format!(
            "{}?latitude={}&longitude={}",
            self.config().endpoints.time_url,
            lat,
            lon
        );

        let current: CurrentTime = self.get_json(&url).await?;
        Ok(current.time_zone.filter(|tz| !tz.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_time_zone() {
        let current: CurrentTime = serde_json::from_str(
            r#"{"year":2024,"month":1,"day":1,"hour":12,"timeZone":"Europe/Paris","dayOfWeek":"Monday"}"#,
        )
        .unwrap();
        assert_eq!(current.time_zone.as_deref(), Some("Europe/Paris"));
    }

    #[test]
    fn test_missing_time_zone_is_none() {
        let current: CurrentTime = serde_json::from_str(r#"{"hour":12}"#).unwrap();
        assert!(current.time_zone.is_none());
    }
}
