//! Embedded tracking metadata.
//!
//! Published bodies carry a single trailing line of the form
//! `<!-- METADATA! {"slug":"...","digest":"..."} !METADATA -->`.
//! Extraction recognizes only a block occupying the whole last line of the
//! body; anything else in the content that merely resembles the marker is
//! ignored.

use serde::{Deserialize, Serialize};

const PREFIX: &str = "<!-- METADATA! ";
const SUFFIX: &str = " !METADATA -->";

/// The `{slug, digest}` tracking payload. Field order here is the wire
/// order of the embedded JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataBlock {
    pub slug: String,
    pub digest: String,
}

/// Append the metadata block on its own line after `body`.
///
/// `body` must be the original authored content; passing a body that
/// already carries a block appends a second one.
pub fn embed(body: &str, block: &MetadataBlock) -> String {
    // MetadataBlock serialization is infallible.
    let json = serde_json::to_string(block).unwrap_or_default();
    format!("{body}\n{PREFIX}{json}{SUFFIX}")
}

/// Recover the metadata block from a published body.
///
/// Returns `None` when the last line is not exactly an embedded block or
/// its JSON payload is malformed. Never fails.
pub fn extract(body: &str) -> Option<MetadataBlock> {
    let last_line = body.rsplit('\n').next()?;
    let json = last_line.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
    serde_json::from_str(json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(slug: &str, digest: &str) -> MetadataBlock {
        MetadataBlock {
            slug: slug.to_owned(),
            digest: digest.to_owned(),
        }
    }

    #[test]
    fn embed_produces_trailing_marker_line() {
        let out = embed("<p>hello</p>", &block("intro", "abc123"));
        assert_eq!(
            out,
            "<p>hello</p>\n<!-- METADATA! {\"slug\":\"intro\",\"digest\":\"abc123\"} !METADATA -->"
        );
    }

    #[test]
    fn round_trip() {
        let original = block("intro-to-graphs", "d41d8cd98f00b204e9800998ecf8427e");
        let extracted = extract(&embed("<h1>Title</h1>\n<p>body</p>", &original)).unwrap();
        assert_eq!(extracted, original);
    }

    #[test]
    fn body_without_marker_yields_none() {
        assert_eq!(extract("<p>no marker here</p>"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn marker_not_on_last_line_is_ignored() {
        let embedded = embed("<p>x</p>", &block("a", "1"));
        let with_trailer = format!("{embedded}\n<p>more content</p>");
        assert_eq!(extract(&with_trailer), None);
    }

    #[test]
    fn marker_with_surrounding_text_is_ignored() {
        let body = "see <!-- METADATA! {\"slug\":\"a\",\"digest\":\"1\"} !METADATA --> inline";
        assert_eq!(extract(body), None);
    }

    #[test]
    fn malformed_json_yields_none() {
        let body = "<p>x</p>\n<!-- METADATA! {not json} !METADATA -->";
        assert_eq!(extract(body), None);
    }

    #[test]
    fn re_embedding_appends_a_second_block() {
        let once = embed("<p>x</p>", &block("a", "1"));
        let twice = embed(&once, &block("a", "2"));
        // Extraction sees the newest block only.
        assert_eq!(extract(&twice).unwrap().digest, "2");
    }
}
