use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};

use crate::common::AppState;
use crate::error::AppResult;
use crate::routes::MessageResponse;
use crate::services::telemetry::{self, NewReading, PageRequest};

use super::types::{
    LatestStoveDataResponse, StoveDataListQuery, StoveDataListResponse, StoveDataRangeQuery,
    StoveDataResponse, StoveDataSavedResponse, StoveReadingRequest,
};

/// Store a reading reported by the stove
#[utoipa::path(
    post,
    path = "/api/stove-data",
    request_body = StoveReadingRequest,
    responses(
        (status = 200, description = "Reading stored", body = StoveDataSavedResponse),
        (status = 400, description = "Missing or malformed field"),
    ),
    tag = "stove-data"
)]
pub async fn post_stove_data(
    State(state): State<AppState>,
    payload: Result<Json<StoveReadingRequest>, JsonRejection>,
) -> AppResult<Json<StoveDataSavedResponse>> {
    let Json(payload) = payload?;
    let reading = NewReading::try_from(payload)?;

    let record = telemetry::append(&state.db, reading).await?;
    tracing::info!(
        id = record.id,
        temperature = record.temperature,
        cooking = record.cooking,
        time_left = record.time_left,
        "Stove reading received"
    );

    Ok(Json(StoveDataSavedResponse {
        message: "Data saved successfully".to_string(),
        data: record.into(),
    }))
}

/// Get the current stove state
///
/// The most recently written reading wins, whether it came from the device
/// or from an operator command.
#[utoipa::path(
    get,
    path = "/api/stove-data/latest",
    responses(
        (status = 200, description = "Latest reading, or a no-data message", body = LatestStoveDataResponse),
    ),
    tag = "stove-data"
)]
pub async fn get_latest_stove_data(
    State(state): State<AppState>,
) -> AppResult<Json<LatestStoveDataResponse>> {
    let response = match telemetry::latest(&state.db).await? {
        Some(record) => LatestStoveDataResponse::Record(record.into()),
        None => LatestStoveDataResponse::Empty(MessageResponse::new("No data available")),
    };

    Ok(Json(response))
}

/// List readings, newest first
#[utoipa::path(
    get,
    path = "/api/stove-data",
    params(StoveDataListQuery),
    responses(
        (status = 200, description = "Readings retrieved successfully", body = StoveDataListResponse),
    ),
    tag = "stove-data"
)]
pub async fn list_stove_data(
    State(state): State<AppState>,
    Query(query): Query<StoveDataListQuery>,
) -> AppResult<Json<StoveDataListResponse>> {
    let request = PageRequest::new(query.page(), query.limit());
    let listing = telemetry::list(&state.db, request).await?;

    Ok(Json(listing.into()))
}

/// Readings within a time range, newest first
#[utoipa::path(
    get,
    path = "/api/stove-data/range",
    params(StoveDataRangeQuery),
    responses(
        (status = 200, description = "Readings retrieved successfully", body = Vec<StoveDataResponse>),
        (status = 400, description = "Missing or unparseable start/end"),
    ),
    tag = "stove-data"
)]
pub async fn get_stove_data_range(
    State(state): State<AppState>,
    Query(query): Query<StoveDataRangeQuery>,
) -> AppResult<Json<Vec<StoveDataResponse>>> {
    let (start, end) = telemetry::parse_range(query.start.as_deref(), query.end.as_deref())?;

    let records = telemetry::range(&state.db, start, end).await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}
