//! Fake third-party services for integration tests.
//!
//! One axum server answers on every provider path. Each source can be told
//! to fail with a status code or to hang past the lookup timeout.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use city_lookup_service::catalog::SongCatalog;
use city_lookup_service::config::{DEFAULT_USER_AGENT, Endpoints, UpstreamConfig};
use city_lookup_service::sources::UpstreamClient;
use city_lookup_service::{AppState, LookupService, build_router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Lookup timeout used by test apps
pub const TEST_TIMEOUT_SECS: u64 = 1;

#[derive(Debug, Clone, Copy, Default)]
pub enum Fault {
    #[default]
    None,
    Status(StatusCode),
    Hang,
}

#[derive(Debug, Clone, Default)]
pub struct Faults {
    pub geocoder: Fault,
    pub time: Fault,
    pub weather: Fault,
    pub air_quality: Fault,
    pub news: Fault,
    pub places: Fault,
}

impl Faults {
    pub fn all_optional(fault: Fault) -> Self {
        Self {
            geocoder: Fault::None,
            time: fault,
            weather: fault,
            air_quality: fault,
            news: fault,
            places: fault,
        }
    }
}

type Shared = Arc<Faults>;

async fn apply(fault: Fault) -> Option<Response> {
    match fault {
        Fault::None => None,
        Fault::Status(status) => Some((status, "upstream exploded").into_response()),
        Fault::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            None
        }
    }
}

async fn search(
    State(faults): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(response) = apply(faults.geocoder).await {
        return response;
    }

    // Nominatim rejects anonymous clients
    let agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if agent != DEFAULT_USER_AGENT {
        return (StatusCode::FORBIDDEN, "missing user agent").into_response();
    }

    let query = params.get("q").map(|q| q.to_lowercase()).unwrap_or_default();
    let body = match query.as_str() {
        "paris" => json!([{
            "place_id": 88066702,
            "lat": "48.8588897",
            "lon": "2.3200410",
            "display_name": "Paris, Île-de-France, France métropolitaine, France",
            "address": { "city": "Paris", "country": "France", "country_code": "fr" }
        }]),
        "boston" => json!([{
            "lat": "42.3554334",
            "lon": "-71.060511",
            "display_name": "Boston, Suffolk County, Massachusetts, United States",
            "address": { "country_code": "us" }
        }]),
        "nowhere" => json!([{
            "lat": "0.0",
            "lon": "0.0",
            "display_name": "Nowhere, Null Island",
            "address": { "country_code": "zz" }
        }]),
        "springfield" => json!([{
            "lat": "39.7990175",
            "lon": "-89.6439575",
            "display_name": "Springfield"
        }]),
        _ => json!([]),
    };
    Json(body).into_response()
}

async fn current_time(State(faults): State<Shared>) -> Response {
    if let Some(response) = apply(faults.time).await {
        return response;
    }
    Json(json!({
        "year": 2024, "month": 5, "day": 1, "hour": 14, "minute": 3,
        "timeZone": "Europe/Paris",
        "dayOfWeek": "Wednesday"
    }))
    .into_response()
}

async fn forecast(State(faults): State<Shared>) -> Response {
    if let Some(response) = apply(faults.weather).await {
        return response;
    }
    Json(json!({
        "latitude": 48.86,
        "longitude": 2.3199997,
        "current_units": { "temperature_2m": "°F", "wind_speed_10m": "mp/h" },
        "current": {
            "time": "2024-05-01T14:00",
            "interval": 900,
            "temperature_2m": 64.2,
            "weather_code": 2,
            "wind_speed_10m": 7.4,
            "relative_humidity_2m": 58
        }
    }))
    .into_response()
}

async fn air_quality(State(faults): State<Shared>) -> Response {
    if let Some(response) = apply(faults.air_quality).await {
        return response;
    }
    Json(json!({
        "current": { "time": "2024-05-01T14:00", "us_aqi": 37, "pm10": 14.1, "pm2_5": 7.9 }
    }))
    .into_response()
}

async fn news(State(faults): State<Shared>, Query(params): Query<HashMap<String, String>>) -> Response {
    if let Some(response) = apply(faults.news).await {
        return response;
    }
    let ceid = params.get("ceid").cloned().unwrap_or_default();
    let items: String = (1..=7)
        .map(|n| {
            format!(
                "<item><title>{ceid} headline {n}</title><link>https://news.example/{n}</link>\
                 <pubDate>Wed, 01 May 2024 0{n}:00:00 GMT</pubDate>\
                 <source url=\"https://paper.example\">Paper {n}</source></item>"
            )
        })
        .collect();
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><rss version=\"2.0\"><channel>\
         <title>Search results</title>{items}</channel></rss>"
    );
    ([(header::CONTENT_TYPE, "application/rss+xml")], body).into_response()
}

async fn interpreter(State(faults): State<Shared>) -> Response {
    if let Some(response) = apply(faults.places).await {
        return response;
    }
    Json(json!({
        "version": 0.6,
        "elements": [
            { "type": "node", "id": 1, "lat": 48.859, "lon": 2.321,
              "tags": { "amenity": "restaurant", "name": "Le Petit Bistro", "cuisine": "french" } },
            { "type": "node", "id": 2, "lat": 48.858, "lon": 2.322,
              "tags": { "amenity": "restaurant" } },
            { "type": "node", "id": 3, "lat": 48.857, "lon": 2.323,
              "tags": { "amenity": "restaurant", "name": "Sushi Rive Gauche" } }
        ]
    }))
    .into_response()
}

/// Starts the fake upstream server and returns its address
pub async fn spawn_upstream(faults: Faults) -> SocketAddr {
    let app = Router::new()
        .route("/search", get(search))
        .route("/api/time/current/coordinate", get(current_time))
        .route("/v1/forecast", get(forecast))
        .route("/v1/air-quality", get(air_quality))
        .route("/rss/search", get(news))
        .route("/api/interpreter", get(interpreter))
        .with_state(Arc::new(faults));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Service router wired to a fake upstream with the given faults
pub async fn setup_app(faults: Faults) -> Router {
    let addr = spawn_upstream(faults).await;
    let upstream = UpstreamConfig {
        timeout_secs: TEST_TIMEOUT_SECS,
        endpoints: Endpoints::with_base(&format!("http://{}", addr)),
        ..Default::default()
    };

    let client = UpstreamClient::new(upstream).expect("Should build HTTP client");
    let catalog = SongCatalog::embedded().expect("Embedded catalog should load");
    let state = AppState {
        lookup: LookupService::new(client, Arc::new(catalog)),
    };
    build_router(state, None)
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
