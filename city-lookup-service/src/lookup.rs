use std::sync::Arc;

use tracing::{info, instrument};

use crate::catalog::SongCatalog;
use crate::error::LookupError;
use crate::fanout::{bounded, within};
use crate::models::{LookupRequest, LookupResponse, Place};
use crate::sources::UpstreamClient;

/// Geocode, fan out, merge.
#[derive(Clone)]
pub struct LookupService {
    upstream: UpstreamClient,
    catalog: Arc<SongCatalog>,
}

impl LookupService {
    pub fn new(upstream: UpstreamClient, catalog: Arc<SongCatalog>) -> Self {
        Self { upstream, catalog }
    }

    pub fn catalog(&self) -> &SongCatalog {
        &self.catalog
    }

    #[instrument(skip_all, fields(city = %request.city))]
    pub async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, LookupError> {
        let limit = self.upstream.timeout();

        let place = within(limit, self.upstream.geocode(&request.city))
            .await?
            .ok_or_else(|| LookupError::CityNotFound(request.city.clone()))?;

        let locale = self.catalog.locale_for(&place.country_code);
        let upstream = &self.upstream;

        let (time_zone, weather, air_quality, news, restaurants) = tokio::join!(
            bounded("time", limit, upstream.time_zone(place.lat, place.lon)),
            bounded("weather", limit, upstream.current_weather(place.lat, place.lon)),
            bounded("air quality", limit, upstream.current_air_quality(place.lat, place.lon)),
            bounded("news", limit, upstream.news(&request.city, &locale)),
            bounded("restaurants", limit, upstream.restaurants(place.lat, place.lon)),
        );

        info!(
            "Fan-out settled: time={} weather={} air_quality={} news={} restaurants={}",
            time_zone.is_filled(),
            weather.is_filled(),
            air_quality.is_filled(),
            news.is_filled(),
            restaurants.is_filled()
        );

        let song = self
            .catalog
            .pick_song(request.mood, &place.country_code)
            .cloned();

        let Place {
            lat,
            lon,
            display_name,
            ..
        } = place;

        Ok(LookupResponse {
            display_name,
            lat,
            lon,
            lang: locale.lang,
            locale: locale.locale,
            time_zone: time_zone.flatten(),
            weather: weather.flatten(),
            air_quality: air_quality.flatten(),
            news: news.unwrap_or_default(),
            restaurants: restaurants.unwrap_or_default(),
            song,
        })
    }
}
