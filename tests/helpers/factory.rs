pub use super::factories::{
    ContentObjectFactory, FeedEntryFactory, ResolverFactory, SeedFactory, StreamRequestFactory,
};

pub struct Factory;

impl Factory {
    pub fn stream_request() -> StreamRequestFactory {
        StreamRequestFactory::new()
    }

    pub fn resolver() -> ResolverFactory {
        ResolverFactory::new()
    }

    pub fn seed() -> SeedFactory {
        SeedFactory::new()
    }

    pub fn feed_entry() -> FeedEntryFactory {
        FeedEntryFactory::new()
    }

    pub fn content_object() -> ContentObjectFactory {
        ContentObjectFactory::new()
    }
}
