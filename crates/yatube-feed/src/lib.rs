//! Post visibility and feed engine.
//!
//! Decides which posts a viewer sees for each listing context, in what
//! order, sliced into which page, and keeps the single-slot page cache that
//! fronts the global feed.

pub mod cache;
pub mod context;
pub mod convert;
pub mod error;
pub mod follow;
pub mod pagination;
pub mod posts;
pub mod resolver;
pub mod settings;
pub mod viewer;

pub use cache::PageCache;
pub use context::FeedContext;
pub use error::FeedError;
pub use follow::{FollowGraph, FollowOutcome};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, paginate};
pub use resolver::resolve;
pub use settings::FeedSettings;
pub use viewer::Viewer;
