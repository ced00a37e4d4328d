pub mod markup;
pub mod page;
pub mod registry;

pub use markup::{EntryRenderer, MarkupRenderer, RenderContext};
pub use page::StreamPage;
pub use registry::{ContentObjectLoader, ObjectRegistry, ResolvedObjects};

#[cfg(test)]
mod registry_test;
