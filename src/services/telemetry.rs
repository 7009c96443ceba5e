//! Append-only store of stove readings.
//!
//! Readings come from two writers: the device reporting ground truth, and the
//! command queue writing the state an operator action is expected to produce.
//! Whichever was written last is the current state.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entity::stove_data;
use crate::error::{AppError, AppResult};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 50;
pub const MAX_LIMIT: u64 = 1000;

/// A reading before the server has assigned it an id and timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewReading {
    pub temperature: f64,
    pub relay: bool,
    pub manual_mode: bool,
    pub cooking: bool,
    pub time_left: i64,
}

/// Validates reading values that the type system cannot rule out.
pub fn validate(reading: &NewReading) -> AppResult<()> {
    if !reading.temperature.is_finite() {
        return Err(AppError::Validation(
            "temperature must be a finite number".to_string(),
        ));
    }

    if reading.time_left < 0 {
        return Err(AppError::Validation(format!(
            "timeLeft must be non-negative, got {}",
            reading.time_left
        )));
    }

    Ok(())
}

/// Normalized pagination request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Missing or non-positive values fall back to the defaults; `limit` is capped.
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page
            .and_then(|p| u64::try_from(p).ok())
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(|l| u64::try_from(l).ok())
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);

        Self { page, limit }
    }

    /// Row offset, clamped to what the database binds as a signed 64-bit value.
    fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of readings, newest first
#[derive(Debug, Clone)]
pub struct Listing {
    pub records: Vec<stove_data::Model>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

#[must_use]
pub fn page_count(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// Store a device-reported reading.
pub async fn append(db: &DatabaseConnection, reading: NewReading) -> AppResult<stove_data::Model> {
    insert(db, reading, None).await
}

/// Insert a reading, optionally linked to the command it reflects.
pub(crate) async fn insert(
    db: &DatabaseConnection,
    reading: NewReading,
    command_id: Option<i32>,
) -> AppResult<stove_data::Model> {
    validate(&reading)?;

    let record = stove_data::ActiveModel {
        temperature: Set(reading.temperature),
        relay: Set(reading.relay),
        manual_mode: Set(reading.manual_mode),
        cooking: Set(reading.cooking),
        time_left: Set(reading.time_left),
        timestamp: Set(super::now()),
        command_id: Set(command_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::debug!(
        id = record.id,
        temperature = record.temperature,
        relay = record.relay,
        manual_mode = record.manual_mode,
        cooking = record.cooking,
        time_left = record.time_left,
        command_id = ?record.command_id,
        "Stove reading stored"
    );

    Ok(record)
}

/// Most recent reading, or `None` on an empty store.
pub async fn latest(db: &DatabaseConnection) -> AppResult<Option<stove_data::Model>> {
    let record = stove_data::Entity::find()
        .order_by_desc(stove_data::Column::Timestamp)
        .order_by_desc(stove_data::Column::Id)
        .one(db)
        .await?;

    Ok(record)
}

pub async fn list(db: &DatabaseConnection, request: PageRequest) -> AppResult<Listing> {
    let total = stove_data::Entity::find().count(db).await?;

    let records = stove_data::Entity::find()
        .order_by_desc(stove_data::Column::Timestamp)
        .order_by_desc(stove_data::Column::Id)
        .offset(request.offset())
        .limit(request.limit)
        .all(db)
        .await?;

    Ok(Listing {
        records,
        page: request.page,
        limit: request.limit,
        total,
        pages: page_count(total, request.limit),
    })
}

/// Readings with `start <= timestamp <= end`, newest first.
///
/// An inverted range is not an error; it simply matches nothing.
pub async fn range(
    db: &DatabaseConnection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<stove_data::Model>> {
    let records = stove_data::Entity::find()
        .filter(stove_data::Column::Timestamp.gte(start.fixed_offset()))
        .filter(stove_data::Column::Timestamp.lte(end.fixed_offset()))
        .order_by_desc(stove_data::Column::Timestamp)
        .order_by_desc(stove_data::Column::Id)
        .all(db)
        .await?;

    Ok(records)
}

/// Parse both bounds of a range query.
pub fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    Ok((parse_bound("start", start)?, parse_bound("end", end)?))
}

fn parse_bound(name: &str, raw: Option<&str>) -> AppResult<DateTime<Utc>> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))?;

    parse_instant(raw)
        .ok_or_else(|| AppError::Validation(format!("{name} is not a valid date/time: {raw}")))
}

/// Accepts RFC 3339, a naive date-time (taken as UTC) or a bare date (UTC midnight).
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    // An unescaped '+' in a query string arrives as a space
    let repaired = raw.replace(' ', "+");

    for candidate in [raw, repaired.as_str()] {
        if let Ok(t) = DateTime::parse_from_rfc3339(candidate) {
            return Some(t.with_timezone(&Utc));
        }
    }

    if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}
