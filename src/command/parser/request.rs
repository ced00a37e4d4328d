use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::command::parser::error::ParseError;
use crate::command::types::{
    ActingUser, EntityId, SortKey, StreamFilters, StreamMode, StreamRequest, ViewType,
};
use crate::shared::config::model::Settings;
use crate::shared::time::TimeParser;

/// Page size used when the request carries no `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 2;

/// Request defaults taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDefaults {
    pub default_limit: u32,
    /// Upper bound applied to client supplied limits, if any.
    pub max_limit: Option<u32>,
}

impl Default for StreamDefaults {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: None,
        }
    }
}

impl StreamDefaults {
    pub fn from_settings(settings: &Settings) -> Self {
        match &settings.stream {
            Some(cfg) => Self {
                default_limit: cfg.default_limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1),
                max_limit: cfg.max_limit.filter(|max| *max > 0),
            },
            None => Self::default(),
        }
    }
}

/// Builds a [`StreamRequest`] from query string parameters.
///
/// The acting user is resolved by the caller; parameters never carry identity.
pub fn parse_request(
    params: &HashMap<String, String>,
    acting_user: ActingUser,
    defaults: &StreamDefaults,
) -> Result<StreamRequest, ParseError> {
    let raw_type = params.get("type").map(String::as_str).unwrap_or_default();
    let Some(view_type) = ViewType::parse(raw_type) else {
        warn!(target: "wall_stream::parse", raw_type, "Invalid wall type");
        return Err(ParseError::InvalidViewType(raw_type.to_string()));
    };

    let target_guid = params
        .get("guid")
        .map(|guid| guid.trim())
        .filter(|guid| !guid.is_empty())
        .map(str::to_string);
    if view_type.requires_target() && target_guid.is_none() {
        return Err(ParseError::MissingParameter("guid".to_string()));
    }

    let page_limit = parse_limit(params.get("limit"), defaults)?;

    let sort_key = match params.get("sort").map(|s| s.trim()) {
        Some("u") => SortKey::UpdatedAt,
        _ => SortKey::CreatedAt,
    };

    let mode = match params.get("mode").map(|s| s.trim()) {
        Some("activity") => StreamMode::ActivityOnly,
        _ => StreamMode::Normal,
    };

    let mut filters = params
        .get("filters")
        .map(|raw| StreamFilters::from_param(raw))
        .unwrap_or_default();
    if let Some(max_date) = parse_max_date(params.get("max_date"))? {
        filters = filters.with_max_date(max_date);
    }

    let request = StreamRequest {
        view_type,
        target_guid,
        acting_user,
        cursor_from: parse_cursor("from", params.get("from"))?,
        cursor_to: parse_cursor("to", params.get("to"))?,
        page_limit,
        sort_key,
        filters,
        mode,
    };

    if tracing::enabled!(tracing::Level::DEBUG) {
        debug!(target: "wall_stream::parse", ?request, "Parsed stream request");
    }
    Ok(request)
}

/// Empty and `0` both mean "no cursor".
fn parse_cursor(name: &str, raw: Option<&String>) -> Result<Option<EntityId>, ParseError> {
    let Some(raw) = raw.map(|s| s.trim()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<EntityId>() {
        Ok(0) => Ok(None),
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(invalid(name, raw)),
    }
}

fn parse_limit(raw: Option<&String>, defaults: &StreamDefaults) -> Result<u32, ParseError> {
    let limit = match raw.map(|s| s.trim()).filter(|s| !s.is_empty()) {
        None => defaults.default_limit,
        Some(raw) => match raw.parse::<u32>() {
            Ok(limit) if limit > 0 => limit,
            _ => return Err(invalid("limit", raw)),
        },
    };
    Ok(match defaults.max_limit {
        Some(max) => limit.min(max),
        None => limit,
    })
}

fn parse_max_date(raw: Option<&String>) -> Result<Option<DateTime<Utc>>, ParseError> {
    let Some(raw) = raw.map(|s| s.trim()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    TimeParser::parse_to_utc(raw)
        .map(Some)
        .ok_or_else(|| invalid("max_date", raw))
}

fn invalid(name: &str, value: &str) -> ParseError {
    ParseError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}
