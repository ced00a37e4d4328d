pub mod loaders;
pub mod schema;
#[cfg(any(test, feature = "seed"))]
pub mod seed;
pub mod sqlite;
pub mod traits;

pub use loaders::{SqliteActivityLoader, SqlitePostLoader, sqlite_registry};
#[cfg(any(test, feature = "seed"))]
pub use seed::{PostSeed, SeededEntry, StoreSeeder};
pub use sqlite::SqliteStore;
pub use traits::{SpaceTarget, StreamStore, TargetResolver, UserTarget};
