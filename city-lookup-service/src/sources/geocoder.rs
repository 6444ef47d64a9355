use serde::Deserialize;
use tracing::info;

use super::UpstreamClient;
use crate::error::UpstreamError;
use crate::models::Place;

/// Country assumed when the geocoder does not report one
pub const DEFAULT_COUNTRY_CODE: &str = "us";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    country_code: Option<String>,
}

impl TryFrom<NominatimPlace> for Place {
    type Error = UpstreamError;

    fn try_from(raw: NominatimPlace) -> Result<Self, Self::Error> {
        let lat = parse_coordinate("lat", &raw.lat)?;
        let lon = parse_coordinate("lon", &raw.lon)?;
        let country_code = raw
            .address
            .and_then(|a| a.country_code)
            .map(|c| c.trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());

        Ok(Place {
            lat,
            lon,
            display_name: raw.display_name,
            country_code,
        })
    }
}

fn parse_coordinate(name: &str, raw: &str) -> Result<f64, UpstreamError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| UpstreamError::Decode(format!("{} is not a number: {:?}", name, raw)))
}

impl UpstreamClient {
    /// First match for `city`, or `None` when the geocoder knows no such place
    pub async fn geocode(&self, city: &str) -> Result<Option<Place>, UpstreamError> {
        let url = format!(
            "{}?q={}&format=json&limit=1&addressdetails=1",
            self.config().endpoints.geocoder_url,
            urlencoding::encode(city)
        );

        let results: Vec<NominatimPlace> = self.get_json(&url).await?;
        let place = results.into_iter().next().map(Place::try_from).transpose()?;

        match &place {
            Some(place) => info!(
                "Geocoded {:?} to {} ({}, {}) [{}]",
                city, place.display_name, place.lat, place.lon, place.country_code
            ),
            None => info!("No geocoding match for {:?}", city),
        }

        Ok(place)
    }
}
