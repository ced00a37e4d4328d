use crate::command::types::ActingUser;
use crate::engine::store::{SpaceTarget, SqliteStore, StoreSeeder, UserTarget};
use crate::engine::types::MembershipStatus;
use std::sync::Arc;

/// A small social graph seeded into an in-memory store.
///
/// - `alice` follows `bob`, `mallory` and the `news` space, and is a member of `team`.
/// - `carol` is enabled but unrelated to alice.
/// - `mallory` is disabled.
/// - alice is only invited to `lounge`.
pub struct SeededWorld {
    pub store: Arc<SqliteStore>,
    pub alice: UserTarget,
    pub bob: UserTarget,
    pub carol: UserTarget,
    pub mallory: UserTarget,
    pub team: SpaceTarget,
    pub news: SpaceTarget,
    pub lounge: SpaceTarget,
}

impl SeededWorld {
    pub fn seeder(&self) -> StoreSeeder<'_> {
        self.store.seeder()
    }

    pub fn acting(&self, user: UserTarget) -> ActingUser {
        user.into()
    }
}

pub struct SeedFactory {
    database_path: Option<String>,
}

impl SeedFactory {
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Seeds a file-backed database instead of an in-memory one.
    pub fn with_database_path(mut self, path: &str) -> Self {
        self.database_path = Some(path.to_string());
        self
    }

    pub fn create(self) -> SeededWorld {
        let store = match &self.database_path {
            Some(path) => SqliteStore::open(path).expect("file store"),
            None => SqliteStore::open_in_memory().expect("in-memory store"),
        };
        let seeder = store.seeder();

        let alice = seeder.user("alice-guid", "Alice").expect("alice");
        let bob = seeder.user("bob-guid", "Bob").expect("bob");
        let carol = seeder.user("carol-guid", "Carol").expect("carol");
        let mallory = seeder
            .user_with_status("mallory-guid", "Mallory", 0)
            .expect("mallory");

        let team = seeder.space("team-guid", "Team").expect("team");
        let news = seeder.space("news-guid", "News").expect("news");
        let lounge = seeder.space("lounge-guid", "Lounge").expect("lounge");

        seeder
            .membership(&team, &alice, MembershipStatus::Member)
            .expect("team membership");
        seeder
            .membership(&lounge, &alice, MembershipStatus::Invited)
            .expect("lounge invitation");
        seeder.follow_user(&alice, &bob).expect("follow bob");
        seeder.follow_user(&alice, &mallory).expect("follow mallory");
        seeder.follow_space(&alice, &news).expect("follow news");
        drop(seeder);

        SeededWorld {
            store: Arc::new(store),
            alice,
            bob,
            carol,
            mallory,
            team,
            news,
            lounge,
        }
    }
}
