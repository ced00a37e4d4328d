use tracing::{debug, info};

use crate::command::types::{
    FilterToken, SortKey, StreamFilters, StreamMode, StreamRequest, ViewType,
};
use crate::engine::errors::{StreamError, TargetKind};
use crate::engine::query::condition::{Condition, GroupKey, Join};
use crate::engine::query::executable::{ExecutableQuery, OrderBy};
use crate::engine::query::query_spec::QuerySpec;
use crate::engine::store::traits::TargetResolver;
use crate::engine::types::{ACTIVITY_MODEL, POST_MODEL, Visibility};

/// Turns a [`StreamRequest`] into a parameterized stream query.
/// Stateless; every step returns a new value.
pub struct StreamQueryBuilder;

impl StreamQueryBuilder {
    /// prepare + apply_filters + finalize.
    pub fn build<R: TargetResolver + ?Sized>(
        request: &StreamRequest,
        resolver: &R,
    ) -> Result<ExecutableQuery, StreamError> {
        let spec = Self::prepare(request, resolver)?;
        let spec = Self::apply_filters(spec, &request.filters);
        Ok(Self::finalize(spec))
    }

    /// prepare + apply_filters for the mail digest. Ordered by the sort key alone:
    /// sticky entries neither lead the first page nor drop out of later ones.
    pub fn build_console<R: TargetResolver + ?Sized>(
        request: &StreamRequest,
        resolver: &R,
    ) -> Result<ExecutableQuery, StreamError> {
        let spec = Self::prepare(request, resolver)?;
        let spec = Self::apply_filters(spec, &request.filters);
        Ok(Self::render(spec, false))
    }

    /// Builds the predicates every request of this view needs, regardless of filters.
    pub fn prepare<R: TargetResolver + ?Sized>(
        request: &StreamRequest,
        resolver: &R,
    ) -> Result<QuerySpec, StreamError> {
        if tracing::enabled!(tracing::Level::INFO) {
            info!(
                target: "wall_stream::query",
                view = %request.view_type,
                limit = request.page_limit,
                "Preparing stream query"
            );
        }

        let mut spec = QuerySpec::for_request(request);
        let user_id = request.acting_user.user_id;

        spec.require(Condition::CreatorEnabled);

        if let Some(cursor) = request.cursor_from {
            match request.sort_key {
                SortKey::CreatedAt => spec.require(Condition::IdBefore(cursor)),
                SortKey::UpdatedAt => spec.require(Condition::UpdatedBefore(cursor)),
            }
        }

        match request.mode {
            StreamMode::Normal => {
                spec.require(Condition::ObjectModelIsNot(ACTIVITY_MODEL.to_string()));
            }
            StreamMode::ActivityOnly => {
                spec.require(Condition::ObjectModelIs(ACTIVITY_MODEL.to_string()));
                spec.require(Condition::NotCreatedBy(user_id));
            }
        }

        match request.view_type {
            ViewType::Dashboard => {
                spec.join(Join::SpaceMembership { user_id });
                spec.require(Condition::DashboardWalls {
                    user_id,
                    own_wall_id: request.acting_user.wall_id,
                });
                spec.require(Condition::SpaceContentVisible);
                spec.group_by(GroupKey::ContentObject);
            }
            ViewType::Community => {
                spec.require(Condition::EnabledUserWalls);
            }
            ViewType::Space => {
                let guid = Self::target_guid(request, TargetKind::Space)?;
                let space = resolver
                    .find_space(guid)?
                    .ok_or_else(|| StreamError::TargetNotFound {
                        kind: TargetKind::Space,
                        guid: guid.to_string(),
                    })?;
                spec.require(Condition::WallIs(space.wall_id));
                if !resolver.is_space_member(space.id, user_id)? {
                    spec.require(Condition::VisibilityIs(Visibility::Public));
                }
            }
            ViewType::UserProfile => {
                let guid = Self::target_guid(request, TargetKind::User)?;
                let user = resolver
                    .find_user(guid)?
                    .ok_or_else(|| StreamError::TargetNotFound {
                        kind: TargetKind::User,
                        guid: guid.to_string(),
                    })?;
                spec.require(Condition::WallIs(user.wall_id));
            }
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(target: "wall_stream::query", conditions = spec.condition_count(), "Mandatory predicates assembled");
        }
        Ok(spec)
    }

    /// Adds the optional filter predicates. Idempotent and order independent.
    pub fn apply_filters(mut spec: QuerySpec, filters: &StreamFilters) -> QuerySpec {
        let user_id = spec.acting_user.user_id;

        if let Some(max_date) = filters.max_date {
            spec.require(Condition::CreatedAfter(max_date.timestamp()));
        }

        if filters.contains(FilterToken::PostsFiles) || filters.contains(FilterToken::PostsLinks) {
            spec.join(Join::Post);
            if filters.contains(FilterToken::PostsFiles) {
                spec.require(Condition::PostHasFile);
            }
            if filters.contains(FilterToken::PostsLinks) {
                spec.require(Condition::PostHasUrl);
            }
        }

        // A single-entry fetch loads one known entry whatever its archive state.
        if spec.page_limit != 1 && !filters.contains(FilterToken::EntryArchived) {
            spec.require(Condition::NotArchived);
        }

        if filters.contains(FilterToken::EntryMine) {
            spec.require(Condition::CreatedBy(user_id));
        }

        if filters.contains(FilterToken::EntryUserInvolved) {
            spec.join(Join::UserContent { user_id });
            spec.require(Condition::UserInvolved);
        }

        if filters.contains(FilterToken::ModelPosts) {
            spec.require(Condition::ObjectModelIs(POST_MODEL.to_string()));
        }

        if filters.contains(FilterToken::VisibilityPrivate) {
            spec.require(Condition::VisibilityIs(Visibility::Private));
        }
        if filters.contains(FilterToken::VisibilityPublic) {
            spec.require(Condition::VisibilityIs(Visibility::Public));
        }

        spec
    }

    /// Chooses ordering and renders the statement.
    ///
    /// Space and profile walls lead with sticky entries on the first page. Once a
    /// cursor is present sticky entries are left out instead, since they were
    /// already shown on the first page.
    pub fn finalize(mut spec: QuerySpec) -> ExecutableQuery {
        let mut sticky_first = false;
        if spec.view_type.surfaces_sticky() && spec.page_limit != 1 {
            if spec.cursor_from.is_none() {
                sticky_first = true;
            } else {
                spec.require(Condition::NotSticked);
            }
        }

        Self::render(spec, sticky_first)
    }

    fn render(spec: QuerySpec, sticky_first: bool) -> ExecutableQuery {
        let order_by = OrderBy {
            sticky_first,
            key: spec.sort_key,
        };
        let query = ExecutableQuery::render(&spec, order_by);

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                target: "wall_stream::query",
                sql = query.sql(),
                params = query.params().len(),
                "Stream query rendered"
            );
        }
        query
    }

    fn target_guid(request: &StreamRequest, kind: TargetKind) -> Result<&str, StreamError> {
        request
            .target_guid
            .as_deref()
            .ok_or_else(|| StreamError::TargetNotFound {
                kind,
                guid: String::new(),
            })
    }
}
