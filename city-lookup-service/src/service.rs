use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    catalog::SongCatalog,
    config::Config,
    error::LookupError,
    lookup::LookupService,
    models::{LookupParams, LookupRequest, LookupResponse},
    sources::UpstreamClient,
};

#[derive(Clone)]
pub struct AppState {
    pub lookup: LookupService,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let catalog = SongCatalog::load(config.catalog_path.as_deref())?;
        info!(
            "Song catalog loaded ({} regional pools)",
            catalog.region_count()
        );

        let upstream = UpstreamClient::new(config.upstream.clone())?;
        Ok(Self {
            lookup: LookupService::new(upstream, Arc::new(catalog)),
        })
    }
}

pub fn create_app(config: &Config) -> anyhow::Result<Router> {
    let state = AppState::new(config)?;
    Ok(build_router(state, Some(&config.static_dir)))
}

pub fn build_router(app_state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api", get(root))
        .route("/api/lookup", get(lookup))
        .route("/health", get(health_check));

    let router = match static_dir {
        Some(dir) if dir.is_dir() => {
            info!("Serving static files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        Some(dir) => {
            warn!(
                "Static directory {} not found, serving the API only",
                dir.display()
            );
            router
        }
        None => router,
    };

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    LookupError::Internal(format!("handler panicked: {}", details)).into_response()
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "City Lookup Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Local time, weather, air quality, news, restaurants and a song for any city",
        "endpoints": {
            "GET /api/lookup?city=<name>&mood=<happy|sad|angry>": "Look up a city",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<LookupResponse>, LookupError> {
    let request = LookupRequest::try_from(params)?;
    info!("Lookup request for {:?} (mood: {:?})", request.city, request.mood);

    let response = state.lookup.lookup(&request).await?;
    Ok(Json(response))
}
