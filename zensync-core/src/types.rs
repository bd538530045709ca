//! Domain types for Zendesk article publishing.
//!
//! `ArticleAttributes` is constructed once per local source pair by the
//! [`crate::attributes`] loader and is immutable afterwards.

/// Default article position when the sidecar does not declare one.
pub const DEFAULT_POSITION: i64 = 1_000_000;

/// Validated attributes for a single local article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleAttributes {
    /// Stable identifier recovered from the embedded metadata block.
    pub slug: String,
    /// Remote article id, when the sidecar pins one (`zendesk_id`).
    pub remote_id: Option<i64>,
    pub title: String,
    pub author: Option<Author>,
    /// Ordered label names, duplicates as authored.
    pub tags: Vec<String>,
    pub position: i64,
    pub promoted: bool,
    /// Absent means "use the configured default".
    pub comments_disabled: Option<bool>,
    /// Raw authored HTML body, without any tracking metadata.
    pub content: String,
}

/// Author declaration from the sidecar. Only ever used to resolve a remote
/// user id; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub tags: Vec<String>,
}

impl Author {
    /// Cache/search key: email when present, else name.
    pub fn key(&self) -> Option<&str> {
        self.email.as_deref().or(self.name.as_deref())
    }
}
