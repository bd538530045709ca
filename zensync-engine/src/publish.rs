//! Sync orchestration — per-article create/update/skip decisions.
//!
//! ## Per-article protocol
//!
//! 1. Build the write-relevant field set (labels, position, promoted,
//!    comments_disabled, resolved author id).
//! 2. Compute the content digest over those fields plus title, body and
//!    the segment/permission identifiers.
//! 3. Resolve identity: by pinned remote id when the sidecar declares one,
//!    else by the slug recovered from the remote body's metadata block.
//! 4. No match: one POST creates the article. Match with identical digest,
//!    `promoted` and `comments_disabled`: skip without a request. Anything
//!    else: PUT the translation, then — only on success — PUT the article.
//!
//! One article's failure never aborts the rest of the run.

use std::fmt;

use serde_json::{json, Map, Value};
use zensync_client::RemoteClient;
use zensync_core::{ArticleAttributes, PublishSettings};

use crate::digest;
use crate::index::{listing_path, ArticleIndex};
use crate::metadata::{self, MetadataBlock};
use crate::users::{self, AuthorCache};

/// The field set that goes into the article sub-resource and, together with
/// the translation fields, into the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFields {
    pub label_names: Vec<String>,
    pub position: i64,
    pub promoted: bool,
    pub comments_disabled: bool,
    pub author_id: Option<i64>,
}

impl WriteFields {
    fn to_json(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("label_names".into(), json!(self.label_names));
        map.insert("position".into(), json!(self.position));
        map.insert("promoted".into(), json!(self.promoted));
        map.insert("comments_disabled".into(), json!(self.comments_disabled));
        if let Some(author_id) = self.author_id {
            map.insert("author_id".into(), json!(author_id));
        }
        map
    }
}

/// Terminal state for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleOutcome {
    Created { id: i64, slug: String },
    Updated { id: i64, slug: String },
    Skipped { id: i64, slug: String },
    Failed { slug: String, kind: FailureKind },
}

/// What went wrong for a failed article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The create POST was rejected or returned no article id.
    Create,
    /// The translation PUT failed; the article PUT was never attempted.
    TranslationUpdate,
    /// The translation PUT succeeded but the article PUT failed; the remote
    /// article is left partially updated.
    PartialUpdate,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Create => write!(f, "create failed"),
            FailureKind::TranslationUpdate => write!(f, "translation update failed"),
            FailureKind::PartialUpdate => {
                write!(f, "article update failed after translation update")
            }
        }
    }
}

/// Summary of one run. Counts are reporting-only; they never feed back
/// into decisions.
#[derive(Debug, Default)]
pub struct RunReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<ArticleOutcome>,
}

impl RunReport {
    fn record(&mut self, outcome: ArticleOutcome) {
        match &outcome {
            ArticleOutcome::Created { .. } => self.created += 1,
            ArticleOutcome::Updated { .. } => self.updated += 1,
            ArticleOutcome::Skipped { .. } => self.skipped += 1,
            ArticleOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// The synchronization engine for one run.
pub struct SyncEngine<'a, C: RemoteClient> {
    client: &'a C,
    settings: &'a PublishSettings,
}

impl<'a, C: RemoteClient> SyncEngine<'a, C> {
    pub fn new(client: &'a C, settings: &'a PublishSettings) -> Self {
        Self { client, settings }
    }

    /// Synchronize every loaded article, in load order.
    ///
    /// Fetches the remote index exactly once; all decisions are made
    /// against that snapshot. Never fails as a whole — individual article
    /// failures are recorded in the report.
    pub fn run(&self, articles: &[ArticleAttributes]) -> RunReport {
        let mut report = RunReport::default();
        if articles.is_empty() {
            log::info!("No article to upload");
            return report;
        }
        let index = ArticleIndex::fetch(self.client, &self.settings.locale, self.settings.section_id);
        let mut author_cache = AuthorCache::new();
        for article in articles {
            let outcome = self.sync_article(article, &index, &mut author_cache);
            report.record(outcome);
        }
        report
    }

    fn sync_article(
        &self,
        article: &ArticleAttributes,
        index: &ArticleIndex,
        author_cache: &mut AuthorCache,
    ) -> ArticleOutcome {
        let comments_disabled = article
            .comments_disabled
            .or(self.settings.comments_disabled)
            .unwrap_or(false);
        // An author that fails to resolve is omitted, not an error.
        let author_id = article
            .author
            .as_ref()
            .and_then(|author| users::resolve(self.client, author, author_cache));
        let fields = WriteFields {
            label_names: article.tags.clone(),
            position: article.position,
            promoted: article.promoted,
            comments_disabled,
            author_id,
        };
        let digest = digest::compute(
            &fields,
            &article.title,
            &article.content,
            self.settings.user_segment_id,
            self.settings.permission_group_id,
        );
        let body = metadata::embed(
            &article.content,
            &MetadataBlock {
                slug: article.slug.clone(),
                digest: digest.clone(),
            },
        );
        let translation = json!({
            "title": article.title,
            "body": body,
            "user_segment_id": self.settings.user_segment_id,
            "permission_group_id": self.settings.permission_group_id,
        });

        let existing = match article.remote_id {
            Some(id) => index.by_id(id),
            None => index.by_slug(&article.slug),
        };
        let existing = existing
            .and_then(|e| e.get("id").and_then(Value::as_i64).map(|id| (e, id)));
        match existing {
            Some((existing, id)) => {
                self.reconcile(article, existing, id, &fields, &digest, &translation)
            }
            None => self.create(article, &fields, &translation),
        }
    }

    fn create(
        &self,
        article: &ArticleAttributes,
        fields: &WriteFields,
        translation: &Value,
    ) -> ArticleOutcome {
        let mut payload = fields.to_json();
        if let Some(translation) = translation.as_object() {
            payload.extend(translation.clone());
        }
        log::info!(
            "Creating a new article for slug: {} with article: {} and translations: {}",
            article.slug,
            Value::Object(fields.to_json()),
            without_body(translation)
        );
        let body = json!({
            "article": payload,
            "notify_subscribers": self.settings.notify_subscribers,
        });
        let path = listing_path(&self.settings.locale, self.settings.section_id, None);
        let id = match self.client.post(&path, &body) {
            Ok(response) => response
                .get("article")
                .and_then(|a| a.get("id"))
                .and_then(Value::as_i64),
            Err(err) => {
                log::debug!("create request for slug {} failed: {err}", article.slug);
                None
            }
        };
        match id {
            Some(id) => {
                log::info!(
                    "Successfully created a new article with id: {id} and slug: {}",
                    article.slug
                );
                ArticleOutcome::Created {
                    id,
                    slug: article.slug.clone(),
                }
            }
            None => {
                log::error!("Unable to create article with slug: {}", article.slug);
                ArticleOutcome::Failed {
                    slug: article.slug.clone(),
                    kind: FailureKind::Create,
                }
            }
        }
    }

    fn reconcile(
        &self,
        article: &ArticleAttributes,
        existing: &Value,
        id: i64,
        fields: &WriteFields,
        digest: &str,
        translation: &Value,
    ) -> ArticleOutcome {
        let remote_body = existing.get("body").and_then(Value::as_str).unwrap_or("");
        let current_digest = metadata::extract(remote_body).map(|block| block.digest);
        let remote_promoted = existing.get("promoted").and_then(Value::as_bool);
        let remote_comments_disabled = existing.get("comments_disabled").and_then(Value::as_bool);
        // promoted/comments_disabled are compared directly, not through the
        // digest: articles published before these fields existed would
        // otherwise all re-upload once.
        if current_digest.as_deref() == Some(digest)
            && remote_promoted == Some(fields.promoted)
            && remote_comments_disabled == Some(fields.comments_disabled)
        {
            log::info!(
                "Skipping article with id: {id} and slug: {}, content has not changed",
                article.slug
            );
            return ArticleOutcome::Skipped {
                id,
                slug: article.slug.clone(),
            };
        }
        self.update(article, id, fields, translation)
    }

    /// Two-phase update: translation first, article second. The article PUT
    /// is never attempted when the translation PUT fails; a failure after a
    /// successful translation PUT leaves the remote article partially
    /// updated and is logged as such.
    fn update(
        &self,
        article: &ArticleAttributes,
        id: i64,
        fields: &WriteFields,
        translation: &Value,
    ) -> ArticleOutcome {
        log::info!(
            "Updating article id: {id} and slug: {} with article: {} and translations: {}",
            article.slug,
            Value::Object(fields.to_json()),
            without_body(translation)
        );
        let translation_path = format!(
            "help_center/articles/{id}/translations/{}.json",
            self.settings.locale
        );
        let translation_ok = match self.client.put(&translation_path, translation) {
            Ok(response) => response
                .get("translation")
                .and_then(|t| t.get("id"))
                .and_then(Value::as_i64)
                .is_some(),
            Err(err) => {
                log::error!(
                    "Unable to update translations for the article with id: {id} and slug: {}: {err}",
                    article.slug
                );
                false
            }
        };
        if !translation_ok {
            return ArticleOutcome::Failed {
                slug: article.slug.clone(),
                kind: FailureKind::TranslationUpdate,
            };
        }
        let article_path = format!("help_center/{}/articles/{id}.json", self.settings.locale);
        let article_body = json!({ "article": fields.to_json() });
        let article_ok = match self.client.put(&article_path, &article_body) {
            Ok(response) => response
                .get("article")
                .and_then(|a| a.get("id"))
                .and_then(Value::as_i64)
                .is_some(),
            Err(err) => {
                log::error!(
                    "Unable to update the article with id: {id} and slug: {}: {err}",
                    article.slug
                );
                false
            }
        };
        if !article_ok {
            log::error!(
                "Translation updated but article update failed; article with id: {id} and slug: {} is partially updated",
                article.slug
            );
            return ArticleOutcome::Failed {
                slug: article.slug.clone(),
                kind: FailureKind::PartialUpdate,
            };
        }
        log::info!(
            "Successfully updated the article with id: {id} and slug: {}",
            article.slug
        );
        ArticleOutcome::Updated {
            id,
            slug: article.slug.clone(),
        }
    }
}

/// Translation fields for logging, with the (large) body left out.
fn without_body(translation: &Value) -> Value {
    let Some(fields) = translation.as_object() else {
        return Value::Object(Map::new());
    };
    let logged: Map<String, Value> = fields
        .iter()
        .filter(|(key, _)| key.as_str() != "body")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Value::Object(logged)
}
