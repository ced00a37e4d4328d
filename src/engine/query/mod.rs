pub mod builder;
pub mod condition;
pub mod executable;
pub mod query_spec;
pub mod sql;


pub use builder::StreamQueryBuilder;
pub use condition::{Condition, GroupKey, Join};
pub use executable::{ExecutableQuery, OrderBy};
pub use query_spec::QuerySpec;
pub use sql::SqlParam;
