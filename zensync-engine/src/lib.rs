//! # zensync-engine
//!
//! The synchronization engine: decides create/update/skip per local article
//! against a snapshot of the remote listing, using an embedded metadata
//! block and a content digest for change detection.
//!
//! Call [`SyncEngine::run`] with the loaded article attributes; it fetches
//! the remote index once, resolves authors through a run-scoped cache, and
//! issues at most two write requests per article.

pub mod digest;
pub mod index;
pub mod metadata;
pub mod publish;
pub mod users;

pub use index::ArticleIndex;
pub use metadata::MetadataBlock;
pub use publish::{ArticleOutcome, FailureKind, RunReport, SyncEngine, WriteFields};
pub use users::AuthorCache;
