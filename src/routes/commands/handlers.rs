use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::common::AppState;
use crate::error::AppResult;
use crate::routes::MessageResponse;
use crate::services::commands::{self, Acknowledgement};

use super::types::{CommandProcessedRequest, PendingCommandResponse};

/// Poll for the next command
///
/// Returns the oldest unprocessed command. The device calls this on a fixed
/// interval and acknowledges each command once executed.
#[utoipa::path(
    get,
    path = "/api/commands/pending",
    responses(
        (status = 200, description = "Oldest pending command, or a no-pending message", body = PendingCommandResponse),
    ),
    tag = "commands"
)]
pub async fn get_pending_command(
    State(state): State<AppState>,
) -> AppResult<Json<PendingCommandResponse>> {
    let pending = if state.config.command_queue_enabled {
        commands::next_pending(&state.db).await?
    } else {
        None
    };

    let response = match pending {
        Some(command) => {
            tracing::debug!(command_id = command.id, kind = ?command.command, "Handing out pending command");
            PendingCommandResponse::Command(command.into())
        }
        None => PendingCommandResponse::Empty(MessageResponse::new("No pending commands")),
    };

    Ok(Json(response))
}

/// Acknowledge an executed command
///
/// Acknowledging an already processed command is a no-op.
#[utoipa::path(
    post,
    path = "/api/commands/processed",
    request_body = CommandProcessedRequest,
    responses(
        (status = 200, description = "Command marked as processed", body = MessageResponse),
        (status = 400, description = "Missing or malformed commandId"),
        (status = 404, description = "Command not found"),
    ),
    tag = "commands"
)]
pub async fn mark_command_processed(
    State(state): State<AppState>,
    payload: Result<Json<CommandProcessedRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(payload) = payload?;
    let command_id = payload.command_id()?;

    match commands::acknowledge(&state.db, command_id).await? {
        Acknowledgement::Acknowledged => {}
        Acknowledgement::AlreadyProcessed => {
            tracing::info!(command_id, "Repeated acknowledgment ignored");
        }
    }

    Ok(Json(MessageResponse::new("Command marked as processed")))
}
