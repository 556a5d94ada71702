//! HTTP API gateway for Fitify.
//!
//! Exposes the wardrobe, laundry and outfit workflow over REST. One
//! [`Stylist`] serves every request; a mutex around it keeps the wardrobe's
//! read-modify-write persistence single-writer.
//!
//! Built on Axum.

pub mod api;
pub mod error;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, response::Json, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use fitify_config::AppConfig;
use fitify_storage::{FsImageStore, JsonFileRepository};
use fitify_wardrobe::{Stylist, Wardrobe};

/// Largest accepted request body; photo uploads arrive base64-encoded.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub stylist: Mutex<Stylist>,
}

pub type SharedState = Arc<GatewayState>;

impl GatewayState {
    pub fn new(stylist: Stylist) -> SharedState {
        Arc::new(Self {
            stylist: Mutex::new(stylist),
        })
    }
}

/// Build the router with every route and layer.
pub fn build_router(state: SharedState, allowed_origin: &str) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::api_router(state))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(allowed_origin))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// CORS for the single configured front-end origin. An unparseable origin
/// leaves cross-origin requests disallowed.
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    match HeaderValue::from_str(allowed_origin) {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            warn!(origin = %allowed_origin, "Invalid gateway.allowed_origin, CORS disabled");
            cors
        }
    }
}

/// Assemble the stylist from configuration.
pub async fn build_stylist(config: &AppConfig) -> fitify_core::Result<Stylist> {
    let repository = Arc::new(JsonFileRepository::new(config.data_dir()));
    let wardrobe = Wardrobe::open(repository, config.laundry.cycle_threshold).await?;
    let collaborators = fitify_providers::build_from_config(config)?;
    let images = Arc::new(FsImageStore::new(config.image_dir()));

    Ok(Stylist::new(
        wardrobe,
        collaborators.outfit_oracle,
        collaborators.vision_oracle,
        collaborators.weather,
        images,
    )
    .configured(config, collaborators.calendar))
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let stylist = build_stylist(&config).await?;
    let app = build_router(GatewayState::new(stylist), &config.gateway.allowed_origin);

    info!(addr = %addr, data_dir = %config.data_dir().display(), "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
