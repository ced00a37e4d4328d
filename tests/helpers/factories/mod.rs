pub mod feed_entry_factory;
pub mod resolver_factory;
pub mod seed_factory;
pub mod stream_request_factory;

pub use feed_entry_factory::{ContentObjectFactory, FeedEntryFactory};
pub use resolver_factory::{InMemoryResolver, ResolverFactory};
pub use seed_factory::{SeedFactory, SeededWorld};
pub use stream_request_factory::StreamRequestFactory;

#[cfg(test)]
mod feed_entry_factory_test;
#[cfg(test)]
mod resolver_factory_test;
#[cfg(test)]
mod seed_factory_test;
#[cfg(test)]
mod stream_request_factory_test;
