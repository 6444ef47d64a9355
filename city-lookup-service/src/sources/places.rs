use serde::Deserialize;

use super::UpstreamClient;
use crate::error::UpstreamError;
use crate::models::Restaurant;

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: OverpassTags,
}

#[derive(Debug, Default, Deserialize)]
struct OverpassTags {
    name: Option<String>,
    cuisine: Option<String>,
}

impl OverpassElement {
    fn into_restaurant(self) -> Option<Restaurant> {
        let name = self.tags.name.filter(|n| !n.trim().is_empty())?;
        Some(Restaurant {
            name,
            cuisine: self.tags.cuisine.filter(|c| !c.is_empty()),
            lat: self.lat?,
            lon: self.lon?,
        })
    }
}

fn restaurant_query(lat: f64, lon: f64, radius_m: u32, limit: usize, timeout_secs: u64) -> String {
    format!(
        "[out:json][timeout:{}];node[\"amenity\"=\"restaurant\"](around:{},{},{});out {};",
        timeout_secs, radius_m, lat, lon, limit
    )
}

fn collect_restaurants(response: OverpassResponse, limit: usize) -> Vec<Restaurant> {
    response
        .elements
        .into_iter()
        .filter_map(OverpassElement::into_restaurant)
        .take(limit)
        .collect()
}

impl UpstreamClient {
    /// Named restaurants around the coordinate
    pub async fn restaurants(&self, lat: f64, lon: f64) -> Result<Vec<Restaurant>, UpstreamError> {
        let config = self.config();
        // Over-fetch: unnamed nodes are dropped afterwards
        let query = restaurant_query(
            lat,
            lon,
            config.restaurant_radius_m,
            config.restaurant_limit * 2,
            config.timeout_secs,
        );
        let url = format!(
            "{}?data={}",
            config.endpoints.places_url,
            urlencoding::encode(&query)
        );

        let response: OverpassResponse = self.get_json(&url).await?;
        Ok(collect_restaurants(response, config.restaurant_limit))
    }
}
