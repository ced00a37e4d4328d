use crate::command::types::EntityId;
use crate::engine::errors::StoreError;
use crate::engine::store::{SpaceTarget, TargetResolver, UserTarget};
use std::collections::{HashMap, HashSet};

/// Target lookups served from memory, for builder tests that never touch SQL.
#[derive(Debug, Default)]
pub struct InMemoryResolver {
    spaces: HashMap<String, SpaceTarget>,
    users: HashMap<String, UserTarget>,
    members: HashSet<(EntityId, EntityId)>,
}

impl TargetResolver for InMemoryResolver {
    fn find_space(&self, guid: &str) -> Result<Option<SpaceTarget>, StoreError> {
        Ok(self.spaces.get(guid).copied())
    }

    fn find_user(&self, guid: &str) -> Result<Option<UserTarget>, StoreError> {
        Ok(self.users.get(guid).copied())
    }

    fn is_space_member(&self, space_id: EntityId, user_id: EntityId) -> Result<bool, StoreError> {
        Ok(self.members.contains(&(space_id, user_id)))
    }
}

pub struct ResolverFactory {
    inner: InMemoryResolver,
}

impl ResolverFactory {
    pub fn new() -> Self {
        let mut inner = InMemoryResolver::default();
        inner.spaces.insert(
            "space-guid".into(),
            SpaceTarget {
                id: 10,
                wall_id: 100,
            },
        );
        inner.users.insert(
            "user-guid".into(),
            UserTarget {
                id: 20,
                wall_id: 200,
                enabled: true,
            },
        );
        Self { inner }
    }

    pub fn with_space(mut self, guid: &str, id: EntityId, wall_id: EntityId) -> Self {
        self.inner
            .spaces
            .insert(guid.to_string(), SpaceTarget { id, wall_id });
        self
    }

    pub fn with_user(mut self, guid: &str, id: EntityId, wall_id: EntityId) -> Self {
        self.inner.users.insert(
            guid.to_string(),
            UserTarget {
                id,
                wall_id,
                enabled: true,
            },
        );
        self
    }

    pub fn with_member(mut self, space_id: EntityId, user_id: EntityId) -> Self {
        self.inner.members.insert((space_id, user_id));
        self
    }

    pub fn create(self) -> InMemoryResolver {
        self.inner
    }
}
