mod handlers;
mod types;

pub use handlers::{get_pending_command, mark_command_processed};
pub use types::{CommandProcessedRequest, CommandResponse, PendingCommandResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{__path_get_pending_command, __path_mark_command_processed};
