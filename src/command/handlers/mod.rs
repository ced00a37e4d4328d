pub mod stream;

pub use stream::StreamHandler;

#[cfg(test)]
mod stream_tests;
