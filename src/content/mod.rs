//! Content module - posts, markdown conversion, loading and queries

mod collection;
pub mod loader;
mod markdown;
mod post;

pub use collection::PostCollection;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Post, RawPost};
