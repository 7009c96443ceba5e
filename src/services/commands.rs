//! Outbox of operator intents drained by the polling device.
//!
//! A command is created with `processed = false`, handed to the device by
//! [`next_pending`] (oldest first), and flipped to processed exactly once by
//! [`acknowledge`]. Commands are never deleted.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::telemetry::{self, NewReading};
use crate::entity::commands::{self, CommandKind};
use crate::entity::stove_data;
use crate::error::{AppError, AppResult};

/// A validated command, ready to be queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandRequest {
    kind: CommandKind,
    seconds: i64,
}

impl CommandRequest {
    /// `start` requires a positive cooking time; every other kind carries zero seconds.
    pub fn new(kind: CommandKind, seconds: Option<i64>) -> AppResult<Self> {
        let seconds = match kind {
            CommandKind::Start => match seconds {
                Some(s) if s > 0 => s,
                _ => return Err(AppError::Validation("Invalid cooking time".to_string())),
            },
            CommandKind::Stop | CommandKind::ManualOn | CommandKind::ManualOff => 0,
        };

        Ok(Self { kind, seconds })
    }

    pub fn start(seconds: Option<i64>) -> AppResult<Self> {
        Self::new(CommandKind::Start, seconds)
    }

    #[must_use]
    pub fn stop() -> Self {
        Self {
            kind: CommandKind::Stop,
            seconds: 0,
        }
    }

    #[must_use]
    pub fn manual(on: bool) -> Self {
        Self {
            kind: if on {
                CommandKind::ManualOn
            } else {
                CommandKind::ManualOff
            },
            seconds: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    #[must_use]
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// State the stove is expected to reach once the device executes this command.
    /// Temperature is unknown until the device reports, so it is written as 0.
    #[must_use]
    pub fn optimistic_reading(&self) -> NewReading {
        let (relay, manual_mode, cooking, time_left) = match self.kind {
            CommandKind::Start => (true, false, true, self.seconds),
            CommandKind::Stop | CommandKind::ManualOff => (false, false, false, 0),
            CommandKind::ManualOn => (true, true, true, 0),
        };

        NewReading {
            temperature: 0.0,
            relay,
            manual_mode,
            cooking,
            time_left,
        }
    }
}

/// Result of queueing a command: the command and the optimistic reading linked to it
#[derive(Debug, Clone)]
pub struct Enqueued {
    pub command: commands::Model,
    pub reading: stove_data::Model,
}

/// Queue a command and record the state it is expected to produce.
///
/// The two inserts are independent. If the second fails the command stays
/// queued without its optimistic reading and the error is returned.
pub async fn enqueue(db: &DatabaseConnection, request: CommandRequest) -> AppResult<Enqueued> {
    let command = commands::ActiveModel {
        command: Set(request.kind),
        seconds: Set(request.seconds),
        timestamp: Set(super::now()),
        processed: Set(false),
        processed_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        command_id = command.id,
        kind = ?command.command,
        seconds = command.seconds,
        "Command queued"
    );

    let reading = telemetry::insert(db, request.optimistic_reading(), Some(command.id)).await?;

    Ok(Enqueued { command, reading })
}

/// Record the optimistic state without queueing anything for the device.
///
/// Used when the command queue is disabled.
pub async fn apply_unqueued(
    db: &DatabaseConnection,
    request: CommandRequest,
) -> AppResult<stove_data::Model> {
    tracing::warn!(
        kind = ?request.kind,
        "Command queue disabled, recording optimistic state only"
    );
    telemetry::insert(db, request.optimistic_reading(), None).await
}

/// Oldest unprocessed command, or `None` when the queue is drained.
pub async fn next_pending(db: &DatabaseConnection) -> AppResult<Option<commands::Model>> {
    let command = commands::Entity::find()
        .filter(commands::Column::Processed.eq(false))
        .order_by_asc(commands::Column::Timestamp)
        .order_by_asc(commands::Column::Id)
        .one(db)
        .await?;

    Ok(command)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    /// This call flipped the command to processed
    Acknowledged,
    /// The command had already been processed; nothing changed
    AlreadyProcessed,
}

/// Mark a command as processed.
///
/// The flip is a conditional update, so concurrent acknowledgments of the
/// same command change it once and the rest report `AlreadyProcessed`.
pub async fn acknowledge(db: &DatabaseConnection, command_id: i32) -> AppResult<Acknowledgement> {
    let result = commands::Entity::update_many()
        .col_expr(commands::Column::Processed, Expr::value(true))
        .col_expr(commands::Column::ProcessedAt, Expr::value(super::now()))
        .filter(commands::Column::Id.eq(command_id))
        .filter(commands::Column::Processed.eq(false))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        tracing::info!(command_id, "Command acknowledged");
        return Ok(Acknowledgement::Acknowledged);
    }

    match commands::Entity::find_by_id(command_id).one(db).await? {
        Some(_) => {
            tracing::debug!(command_id, "Command already processed");
            Ok(Acknowledgement::AlreadyProcessed)
        }
        None => Err(AppError::NotFound(format!(
            "Command '{command_id}' not found"
        ))),
    }
}
