use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::entity::commands::{self, CommandKind};
use crate::error::{AppError, AppResult};
use crate::routes::{coerce, MessageResponse};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub id: i32,
    pub command: CommandKind,
    pub seconds: i64,
    pub timestamp: DateTime<Utc>,
    pub processed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

impl From<commands::Model> for CommandResponse {
    fn from(m: commands::Model) -> Self {
        Self {
            id: m.id,
            command: m.command,
            seconds: m.seconds,
            timestamp: m.timestamp.with_timezone(&Utc),
            processed: m.processed,
            processed_at: m.processed_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}

/// Oldest pending command, or a message when the queue is drained
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PendingCommandResponse {
    Command(CommandResponse),
    Empty(MessageResponse),
}

/// Acknowledgment sent by the device after executing a command
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommandProcessedRequest {
    /// Identifier of the executed command (integer or numeric string)
    #[schema(value_type = i32)]
    pub command_id: Option<Value>,
}

impl CommandProcessedRequest {
    /// Ids outside the `i32` range cannot exist, so they report not-found.
    pub fn command_id(&self) -> AppResult<i32> {
        let raw = self
            .command_id
            .as_ref()
            .filter(|v| !v.is_null())
            .ok_or_else(|| AppError::Validation("commandId is required".to_string()))?;

        let id = coerce::integer(raw)
            .ok_or_else(|| AppError::Validation(format!("Invalid commandId: {raw}")))?;

        i32::try_from(id).map_err(|_| AppError::NotFound(format!("Command '{id}' not found")))
    }
}
