mod coerce;
pub mod commands;
pub mod control;
pub mod health;
pub mod stove_data;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::{OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

/// Body for responses that carry only a message
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        stove_data::post_stove_data,
        stove_data::get_latest_stove_data,
        stove_data::list_stove_data,
        stove_data::get_stove_data_range,
        control::start_cooking,
        control::stop_cooking,
        control::toggle_manual,
        commands::get_pending_command,
        commands::mark_command_processed,
    ),
    components(
        schemas(
            MessageResponse,
            health::HealthResponse,
            stove_data::StoveReadingRequest,
            stove_data::StoveDataResponse,
            stove_data::StoveDataSavedResponse,
            stove_data::LatestStoveDataResponse,
            stove_data::StoveDataListResponse,
            stove_data::PaginationInfo,
            control::StartCookingRequest,
            control::ToggleManualRequest,
            control::ControlResponse,
            commands::CommandResponse,
            commands::PendingCommandResponse,
            commands::CommandProcessedRequest,
            crate::entity::commands::CommandKind,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "stove-data", description = "Stove readings and current state"),
        (name = "control", description = "Operator actions"),
        (name = "commands", description = "Device command polling and acknowledgment"),
    ),
    info(
        title = "eStove API",
        description = "Telemetry and command relay API for the eStove cooking appliance",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    tracing::info!(
        command_queue = config.command_queue_enabled,
        origins = ?config.cors_allowed_origins,
        request_timeout_secs = config.request_timeout_seconds,
        "Router configured"
    );

    let api_routes = Router::new()
        .route(
            "/stove-data",
            post(stove_data::post_stove_data).get(stove_data::list_stove_data),
        )
        .route("/stove-data/latest", get(stove_data::get_latest_stove_data))
        .route("/stove-data/range", get(stove_data::get_stove_data_range))
        .route("/start-cooking", post(control::start_cooking))
        .route("/stop-cooking", post(control::stop_cooking))
        .route("/toggle-manual", post(control::toggle_manual))
        .route("/commands/pending", get(commands::get_pending_command))
        .route("/commands/processed", post(commands::mark_command_processed))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check and greeting
    let root_routes = Router::new()
        .route("/", get(health::welcome))
        .route("/health", get(health::health));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Outermost first; the timeout sits closest to the handlers
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_seconds),
        ));

    Router::new()
        .nest("/api", api_routes)
        .merge(root_routes)
        .merge(docs_routes)
        .layer(middleware)
        .with_state(state)
}

/// CORS restricted to the configured client origins, with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ORIGIN])
        .allow_credentials(true)
}
