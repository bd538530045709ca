//! Content digest for change detection.
//!
//! The digest is a lowercase-hex MD5 over a canonical JSON serialization of
//! every field that makes a remote write necessary. Field order is the
//! struct declaration order below and nothing else, so identical inputs
//! always produce identical digests across runs and builds. This is a
//! fingerprint, not an integrity or security measure.

use md5::{Digest, Md5};
use serde::Serialize;

use crate::publish::WriteFields;

#[derive(Serialize)]
struct DigestPayload<'a> {
    label_names: &'a [String],
    position: i64,
    promoted: bool,
    comments_disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_id: Option<i64>,
    title: &'a str,
    content: &'a str,
    user_segment_id: i64,
    permission_group_id: i64,
}

/// Compute the change-detection digest for one article.
pub fn compute(
    fields: &WriteFields,
    title: &str,
    content: &str,
    user_segment_id: i64,
    permission_group_id: i64,
) -> String {
    let payload = DigestPayload {
        label_names: &fields.label_names,
        position: fields.position,
        promoted: fields.promoted,
        comments_disabled: fields.comments_disabled,
        author_id: fields.author_id,
        title,
        content,
        user_segment_id,
        permission_group_id,
    };
    // Serialization of a plain struct is infallible.
    let json = serde_json::to_string(&payload).unwrap_or_default();
    let mut hasher = Md5::new();
    hasher.update(json.as_bytes());
    hex::encode(hasher.finalize())
}
