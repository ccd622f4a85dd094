//! HTTP transport for the observation API
//!
//! Maps the fixed route table onto [`ObservationQueryService`] and serializes
//! results as JSON. Failures become 500 responses through
//! `ClimateError`'s `IntoResponse` impl.

use crate::config::HttpConfig;
use crate::error::{ClimateError, Result};
use crate::services::models::{
    PrecipitationByDate, RouteListing, StationEntry, TemperatureStats, TobsEntry,
};
use crate::services::ObservationQueryService;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
struct AppState {
    service: ObservationQueryService,
}

type SharedState = Arc<AppState>;

/// HTTP server for the observation API
pub struct HttpServer {
    service: ObservationQueryService,
    config: HttpConfig,
}

impl HttpServer {
    pub fn new(service: ObservationQueryService, config: HttpConfig) -> Self {
        Self { service, config }
    }

    /// Serve until `shutdown` resolves
    pub async fn start<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            ClimateError::config(format!("Failed to bind to {addr}: {e}"))
        })?;

        info!("HTTP server listening on http://{}", addr);
        info!("Route index: http://{}/", addr);

        let app = create_router(self.service.clone(), self.config.enable_cors);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Create the router with all endpoints
pub fn create_router(service: ObservationQueryService, enable_cors: bool) -> Router {
    let shared_state = Arc::new(AppState { service });

    // Static segments win over `:start`, so the named endpoints never reach
    // the stats handler.
    let router = Router::new()
        .route("/", get(list_routes))
        .route("/api/v1.0/precipitation", get(recent_precipitation))
        .route("/api/v1.0/stations", get(list_stations))
        .route("/api/v1.0/tobs", get(most_active_station_temps))
        .route("/api/v1.0/:start", get(temperature_stats_from))
        .route("/api/v1.0/:start/:end", get(temperature_stats_between))
        .with_state(shared_state);

    if enable_cors {
        info!("CORS enabled (permissive)");
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn list_routes(State(state): State<SharedState>) -> Json<RouteListing> {
    Json(state.service.list_routes())
}

async fn recent_precipitation(
    State(state): State<SharedState>,
) -> Result<Json<PrecipitationByDate>> {
    Ok(Json(state.service.recent_precipitation().await?))
}

async fn list_stations(State(state): State<SharedState>) -> Result<Json<Vec<StationEntry>>> {
    Ok(Json(state.service.list_stations().await?))
}

async fn most_active_station_temps(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TobsEntry>>> {
    Ok(Json(state.service.most_active_station_temps().await?))
}

async fn temperature_stats_from(
    State(state): State<SharedState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>> {
    Ok(Json(state.service.temperature_stats(&start, None).await?))
}

async fn temperature_stats_between(
    State(state): State<SharedState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>> {
    Ok(Json(
        state.service.temperature_stats(&start, Some(&end)).await?,
    ))
}
