use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::entity::stove_data;
use crate::error::{AppError, AppResult};
use crate::routes::{coerce, MessageResponse};
use crate::services::telemetry::{Listing, NewReading};

/// Reading posted by the stove firmware
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoveReadingRequest {
    /// Temperature in °C (number or numeric string)
    #[schema(value_type = f64)]
    pub temperature: Option<Value>,
    /// Heating element energized
    #[schema(value_type = bool)]
    pub relay: Option<Value>,
    /// Direct operator control, no timer
    #[schema(value_type = bool)]
    pub manual_mode: Option<Value>,
    /// Cook cycle active
    #[schema(value_type = bool)]
    pub cooking: Option<Value>,
    /// Seconds remaining in the cook cycle
    #[schema(value_type = i64)]
    pub time_left: Option<Value>,
}

impl TryFrom<StoveReadingRequest> for NewReading {
    type Error = AppError;

    fn try_from(req: StoveReadingRequest) -> AppResult<Self> {
        let temperature = required(req.temperature.as_ref(), "temperature", coerce::number)?;
        let relay = required(req.relay.as_ref(), "relay", coerce::flag)?;
        let manual_mode = required(req.manual_mode.as_ref(), "manualMode", coerce::flag)?;
        let cooking = required(req.cooking.as_ref(), "cooking", coerce::flag)?;
        let time_left = required(req.time_left.as_ref(), "timeLeft", coerce::integer)?;

        Ok(Self {
            temperature,
            relay,
            manual_mode,
            cooking,
            time_left,
        })
    }
}

fn required<T>(
    value: Option<&Value>,
    field: &str,
    convert: fn(&Value) -> Option<T>,
) -> AppResult<T> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))?;

    convert(value).ok_or_else(|| AppError::Validation(format!("{field} has an invalid value: {value}")))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoveDataResponse {
    pub id: i32,
    pub temperature: f64,
    pub relay: bool,
    pub manual_mode: bool,
    pub cooking: bool,
    pub time_left: i64,
    pub timestamp: DateTime<Utc>,
    /// Command this state was written for; absent for device reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_id: Option<i32>,
}

impl From<stove_data::Model> for StoveDataResponse {
    fn from(m: stove_data::Model) -> Self {
        Self {
            id: m.id,
            temperature: m.temperature,
            relay: m.relay,
            manual_mode: m.manual_mode,
            cooking: m.cooking,
            time_left: m.time_left,
            timestamp: m.timestamp.with_timezone(&Utc),
            command_id: m.command_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoveDataSavedResponse {
    pub message: String,
    pub data: StoveDataResponse,
}

/// Latest reading, or a message when nothing has been recorded yet
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LatestStoveDataResponse {
    Record(StoveDataResponse),
    Empty(MessageResponse),
}

/// Query parameters for the paginated listing.
///
/// Values are parsed leniently: anything missing, non-numeric or
/// non-positive falls back to the default.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StoveDataListQuery {
    /// Page number (1-indexed, default 1)
    pub page: Option<String>,
    /// Page size (default 50, max 1000)
    pub limit: Option<String>,
}

impl StoveDataListQuery {
    pub fn page(&self) -> Option<i64> {
        self.page.as_deref().and_then(|s| s.trim().parse().ok())
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoveDataListResponse {
    pub data: Vec<StoveDataResponse>,
    pub pagination: PaginationInfo,
}

impl From<Listing> for StoveDataListResponse {
    fn from(listing: Listing) -> Self {
        Self {
            data: listing.records.into_iter().map(Into::into).collect(),
            pagination: PaginationInfo {
                page: listing.page,
                limit: listing.limit,
                total: listing.total,
                pages: listing.pages,
            },
        }
    }
}

/// Query parameters for the time range endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct StoveDataRangeQuery {
    /// Start of range, inclusive (ISO 8601)
    pub start: Option<String>,
    /// End of range, inclusive (ISO 8601)
    pub end: Option<String>,
}
