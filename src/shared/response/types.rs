use serde::{Serialize, Serializer};
use std::fmt;

use crate::command::types::EntityId;

/// HTTP-style status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    BadRequest,
    Unauthorized,
    NotFound,
    InternalError,
}

impl StatusCode {
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::NotFound => 404,
            StatusCode::InternalError => 500,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalError => "Internal Error",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.message())
    }
}

impl From<StatusCode> for hyper::StatusCode {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::Ok => hyper::StatusCode::OK,
            StatusCode::BadRequest => hyper::StatusCode::BAD_REQUEST,
            StatusCode::Unauthorized => hyper::StatusCode::UNAUTHORIZED,
            StatusCode::NotFound => hyper::StatusCode::NOT_FOUND,
            StatusCode::InternalError => hyper::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// One rendered page of a wall stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponse {
    pub output: String,
    /// Cursor for the next page; `""` when the page is empty.
    #[serde(serialize_with = "serialize_last_entry_id")]
    pub last_entry_id: Option<EntityId>,
    pub counter: usize,
    pub entry_ids: Vec<EntityId>,
}

fn serialize_last_entry_id<S>(value: &Option<EntityId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(id) => serializer.serialize_i64(*id),
        None => serializer.serialize_str(""),
    }
}

/// Mail digest of a stream page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestResponse {
    pub output: String,
    pub counter: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Stream(StreamResponse),
    Digest(DigestResponse),
    Error { status: StatusCode, message: String },
}

impl Response {
    pub fn error(status: StatusCode, message: impl ToString) -> Self {
        Response::Error {
            status,
            message: message.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Response::Stream(_) | Response::Digest(_) => StatusCode::Ok,
            Response::Error { status, .. } => *status,
        }
    }
}
