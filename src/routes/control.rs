//! Operator actions: start, stop and manual mode.
//!
//! Each action queues a command for the device and writes the state it is
//! expected to produce, so clients see the change before the device reports.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::routes::coerce;
use crate::routes::commands::CommandResponse;
use crate::routes::stove_data::StoveDataResponse;
use crate::services::commands::{self, CommandRequest};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartCookingRequest {
    /// Cooking time in seconds, must be positive
    #[schema(value_type = i64)]
    pub seconds: Option<Value>,
    /// Informational only, not stored
    #[schema(value_type = Option<String>)]
    pub food_type: Option<Value>,
    /// Informational only, not stored
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleManualRequest {
    #[schema(value_type = bool)]
    pub manual_mode: Option<Value>,
}

/// Outcome of an operator action
#[derive(Debug, Serialize, ToSchema)]
pub struct ControlResponse {
    pub message: String,
    /// Optimistic stove state written for this action
    pub data: StoveDataResponse,
    /// Queued command; absent when the command queue is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandResponse>,
}

/// Start a timed cook cycle
#[utoipa::path(
    post,
    path = "/api/start-cooking",
    request_body = StartCookingRequest,
    responses(
        (status = 200, description = "Cooking started", body = ControlResponse),
        (status = 400, description = "Invalid cooking time"),
    ),
    tag = "control"
)]
pub async fn start_cooking(
    State(state): State<AppState>,
    payload: Result<Json<StartCookingRequest>, JsonRejection>,
) -> AppResult<Json<ControlResponse>> {
    let Json(payload) = payload?;
    let seconds = payload.seconds.as_ref().and_then(coerce::integer);
    let request = CommandRequest::start(seconds)?;

    let response = dispatch(&state, request, "Cooking started successfully").await?;
    tracing::info!(
        seconds = request.seconds(),
        food_type = ?payload.food_type,
        weight = ?payload.weight,
        "Cooking started"
    );

    Ok(Json(response))
}

/// Stop the current cook cycle
#[utoipa::path(
    post,
    path = "/api/stop-cooking",
    responses(
        (status = 200, description = "Cooking stopped", body = ControlResponse),
    ),
    tag = "control"
)]
pub async fn stop_cooking(State(state): State<AppState>) -> AppResult<Json<ControlResponse>> {
    let response = dispatch(&state, CommandRequest::stop(), "Cooking stopped successfully").await?;
    tracing::info!("Cooking stopped");

    Ok(Json(response))
}

/// Switch manual mode on or off
///
/// A missing or unrecognized `manualMode` is rejected rather than read as
/// `false`, unlike the firmware-era server which queued `manual_off` for it.
#[utoipa::path(
    post,
    path = "/api/toggle-manual",
    request_body = ToggleManualRequest,
    responses(
        (status = 200, description = "Manual mode toggled", body = ControlResponse),
        (status = 400, description = "manualMode missing or not a boolean"),
    ),
    tag = "control"
)]
pub async fn toggle_manual(
    State(state): State<AppState>,
    payload: Result<Json<ToggleManualRequest>, JsonRejection>,
) -> AppResult<Json<ControlResponse>> {
    let Json(payload) = payload?;
    let manual_mode = payload
        .manual_mode
        .as_ref()
        .and_then(coerce::flag)
        .ok_or_else(|| AppError::Validation("manualMode must be a boolean".to_string()))?;

    let response = dispatch(
        &state,
        CommandRequest::manual(manual_mode),
        "Manual mode toggled successfully",
    )
    .await?;
    tracing::info!(manual_mode, "Manual mode toggled");

    Ok(Json(response))
}

async fn dispatch(
    state: &AppState,
    request: CommandRequest,
    message: &str,
) -> AppResult<ControlResponse> {
    let (data, command) = if state.config.command_queue_enabled {
        let enqueued = commands::enqueue(&state.db, request).await?;
        (enqueued.reading.into(), Some(enqueued.command.into()))
    } else {
        let reading = commands::apply_unqueued(&state.db, request).await?;
        (reading.into(), None)
    };

    Ok(ControlResponse {
        message: message.to_string(),
        data,
        command,
    })
}
