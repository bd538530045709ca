//! Remote article listing snapshot.
//!
//! Fetched once per run: page 1 gives the page count, the remaining pages
//! are fetched one by one and concatenated in page order. A failed page
//! fetch contributes nothing (the run degrades to creating what it cannot
//! see). Articles are then indexed by remote id and by the slug recovered
//! from their embedded metadata block.

use std::collections::HashMap;

use serde_json::Value;
use zensync_client::RemoteClient;

use crate::metadata;

/// Snapshot of the remote listing for one section/locale, valid for a
/// single run.
#[derive(Debug, Default)]
pub struct ArticleIndex {
    articles: Vec<Value>,
    by_id: HashMap<i64, usize>,
    by_slug: HashMap<String, usize>,
}

impl ArticleIndex {
    /// Fetch and index every listing page.
    ///
    /// A failed or unparsable initial fetch yields an empty index, so every
    /// local article falls through to the create path.
    pub fn fetch<C: RemoteClient>(client: &C, locale: &str, section_id: i64) -> Self {
        let first = match client.get(&listing_path(locale, section_id, None)) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Unable to fetch the article listing: {err}");
                return Self::default();
            }
        };
        let page_count = first.get("page_count").and_then(Value::as_u64).unwrap_or(1);
        let mut articles = page_articles(&first);
        for page in 2..=page_count {
            match client.get(&listing_path(locale, section_id, Some(page))) {
                Ok(json) => articles.extend(page_articles(&json)),
                Err(err) => {
                    log::warn!("Unable to fetch page {page} of the article listing: {err}");
                }
            }
        }
        Self::build(articles)
    }

    fn build(articles: Vec<Value>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_slug = HashMap::new();
        for (position, article) in articles.iter().enumerate() {
            // Articles without a numeric id are unusable for updates.
            let Some(id) = article.get("id").and_then(Value::as_i64) else {
                continue;
            };
            by_id.insert(id, position);
            let body = article.get("body").and_then(Value::as_str).unwrap_or("");
            if let Some(block) = metadata::extract(body) {
                by_slug.insert(block.slug, position);
            }
        }
        Self {
            articles,
            by_id,
            by_slug,
        }
    }

    pub fn by_id(&self, id: i64) -> Option<&Value> {
        self.by_id.get(&id).map(|&i| &self.articles[i])
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Value> {
        self.by_slug.get(slug).map(|&i| &self.articles[i])
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// `help_center/{locale}/sections/{sectionId}/articles.json[?page={n}]`
///
/// Page 1 omits the query parameter.
pub fn listing_path(locale: &str, section_id: i64, page: Option<u64>) -> String {
    match page {
        Some(page) => {
            format!("help_center/{locale}/sections/{section_id}/articles.json?page={page}")
        }
        None => format!("help_center/{locale}/sections/{section_id}/articles.json"),
    }
}

fn page_articles(json: &Value) -> Vec<Value> {
    let Some(items) = json.get("articles").and_then(Value::as_array) else {
        return Vec::new();
    };
    items.iter().filter(|a| a.is_object()).cloned().collect()
}
