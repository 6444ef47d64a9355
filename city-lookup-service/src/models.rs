use serde::{Deserialize, Serialize};

use crate::catalog::{Mood, SongEntry};
use crate::error::LookupError;

/// Raw query parameters of `/api/lookup`. Both optional so that a missing
/// city is reported with our own message instead of the extractor's.
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub city: Option<String>,
    pub mood: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub city: String,
    pub mood: Option<Mood>,
}

impl TryFrom<LookupParams> for LookupRequest {
    type Error = LookupError;

    fn try_from(params: LookupParams) -> Result<Self, Self::Error> {
        let city = params
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(LookupError::MissingCity)?;

        // Unknown moods mean "no song", never an error
        let mood = params.mood.as_deref().and_then(|m| m.parse::<Mood>().ok());

        Ok(Self { city, mood })
    }
}

/// Best geocoding match for the requested city
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
    pub country_code: String,
}

/// Current conditions as reported by the weather provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub weather_code: Option<i32>,
    pub wind_speed_10m: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub time: Option<String>,
    pub us_aqi: Option<f64>,
    pub pm10: Option<f64>,
    pub pm2_5: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub source: String,
    pub pub_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub cuisine: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Body of a successful `/api/lookup` response. Every field is always
/// present; unavailable sources show up as null or an empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub lang: String,
    pub locale: String,
    pub time_zone: Option<String>,
    pub weather: Option<Weather>,
    pub air_quality: Option<AirQuality>,
    pub news: Vec<NewsItem>,
    pub restaurants: Vec<Restaurant>,
    pub song: Option<SongEntry>,
}
