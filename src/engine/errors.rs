use thiserror::Error;
use tracing::{debug, error, warn};

use crate::command::parser::ParseError;
use crate::shared::response::StatusCode;

/// Which kind of target a `guid` was expected to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Space,
    User,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Space => f.write_str("space"),
            TargetKind::User => f.write_str("user"),
        }
    }
}

/// Errors raised while assembling or running a stream query.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("{kind} not found: {guid}")]
    TargetNotFound { kind: TargetKind, guid: String },

    #[error("Invalid request: {0}")]
    Parse(#[from] ParseError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl StreamError {
    pub fn status(&self) -> StatusCode {
        match self {
            StreamError::Parse(_) => StatusCode::BadRequest,
            StreamError::TargetNotFound { .. } => StatusCode::NotFound,
            StreamError::Store(_) => StatusCode::InternalError,
        }
    }

    pub fn log_error(&self) {
        match self {
            StreamError::TargetNotFound { kind, guid } => {
                warn!(target: "wall_stream::query", %kind, %guid, "Stream target not found");
            }
            StreamError::Parse(e) => {
                warn!(target: "wall_stream::query", error = %e, "Rejected stream request");
            }
            StreamError::Store(e) => {
                error!(target: "wall_stream::store", "Stream query failed: {}", e);
                debug!(target: "wall_stream::store", "Store error details: {:?}", e);
            }
        }
    }
}
