use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Surrogate key of every stored row (users, spaces, walls, content, wall entries).
pub type EntityId = i64;

/// Which feed is being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    Dashboard,
    UserProfile,
    Community,
    Space,
}

impl ViewType {
    /// Parses the `type` request parameter.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dashboard" => Some(ViewType::Dashboard),
            "user" => Some(ViewType::UserProfile),
            "community" => Some(ViewType::Community),
            "space" => Some(ViewType::Space),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Dashboard => "dashboard",
            ViewType::UserProfile => "user",
            ViewType::Community => "community",
            ViewType::Space => "space",
        }
    }

    /// Views scoped to a single wall surface sticky entries on their first page.
    pub fn surfaces_sticky(&self) -> bool {
        matches!(self, ViewType::Space | ViewType::UserProfile)
    }

    /// Views that need a `guid` pointing at a space or a user.
    pub fn requires_target(&self) -> bool {
        matches!(self, ViewType::Space | ViewType::UserProfile)
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest entry first, by wall entry id.
    #[default]
    CreatedAt,
    /// Most recently updated entry first.
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamMode {
    /// Everything except activity records.
    #[default]
    Normal,
    /// Only activity records, never the acting user's own.
    ActivityOnly,
}

impl StreamMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamMode::Normal => "normal",
            StreamMode::ActivityOnly => "activity",
        }
    }
}

/// Recognized values of the `filters` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterToken {
    PostsFiles,
    PostsLinks,
    EntryArchived,
    EntryMine,
    EntryUserInvolved,
    ModelPosts,
    VisibilityPrivate,
    VisibilityPublic,
}

impl FilterToken {
    /// Returns `None` for tokens outside the vocabulary; callers ignore those.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "posts_files" => Some(FilterToken::PostsFiles),
            "posts_links" => Some(FilterToken::PostsLinks),
            "entry_archived" => Some(FilterToken::EntryArchived),
            "entry_mine" => Some(FilterToken::EntryMine),
            // Older clients still send the misspelled form.
            "entry_userinvolved" | "entry_userinvoled" => Some(FilterToken::EntryUserInvolved),
            "model_posts" => Some(FilterToken::ModelPosts),
            "visibility_private" => Some(FilterToken::VisibilityPrivate),
            "visibility_public" => Some(FilterToken::VisibilityPublic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterToken::PostsFiles => "posts_files",
            FilterToken::PostsLinks => "posts_links",
            FilterToken::EntryArchived => "entry_archived",
            FilterToken::EntryMine => "entry_mine",
            FilterToken::EntryUserInvolved => "entry_userinvolved",
            FilterToken::ModelPosts => "model_posts",
            FilterToken::VisibilityPrivate => "visibility_private",
            FilterToken::VisibilityPublic => "visibility_public",
        }
    }
}

/// Optional narrowing applied on top of the mandatory view predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamFilters {
    pub tokens: BTreeSet<FilterToken>,
    /// Only entries created after this instant.
    pub max_date: Option<DateTime<Utc>>,
}

impl StreamFilters {
    pub fn from_tokens<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: raw
                .into_iter()
                .filter_map(|token| FilterToken::parse(token.as_ref()))
                .collect(),
            max_date: None,
        }
    }

    /// Splits a comma separated `filters` parameter.
    pub fn from_param(raw: &str) -> Self {
        Self::from_tokens(raw.split(','))
    }

    pub fn with_max_date(mut self, max_date: DateTime<Utc>) -> Self {
        self.max_date = Some(max_date);
        self
    }

    pub fn contains(&self, token: FilterToken) -> bool {
        self.tokens.contains(&token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.max_date.is_none()
    }
}

/// The user the feed is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActingUser {
    pub user_id: EntityId,
    pub wall_id: EntityId,
}

/// One feed request. Built per invocation and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub view_type: ViewType,
    pub target_guid: Option<String>,
    pub acting_user: ActingUser,
    /// Only entries older than this one (the previous page's last entry).
    pub cursor_from: Option<EntityId>,
    /// Accepted from clients but not used for filtering.
    pub cursor_to: Option<EntityId>,
    pub page_limit: u32,
    pub sort_key: SortKey,
    pub filters: StreamFilters,
    pub mode: StreamMode,
}

impl StreamRequest {
    pub fn new(view_type: ViewType, acting_user: ActingUser, page_limit: u32) -> Self {
        Self {
            view_type,
            target_guid: None,
            acting_user,
            cursor_from: None,
            cursor_to: None,
            page_limit,
            sort_key: SortKey::default(),
            filters: StreamFilters::default(),
            mode: StreamMode::default(),
        }
    }

    pub fn is_paginating(&self) -> bool {
        self.cursor_from.is_some()
    }
}
