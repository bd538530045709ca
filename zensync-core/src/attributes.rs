//! YAML sidecar loader.
//!
//! Every `*.html` file under the source directories is paired with a
//! `<stem>.yml` sidecar. Files without a sidecar, with unparsable YAML, or
//! failing field validation are skipped with a warning — never a hard
//! failure. One validation rule per field, evaluated once, here.

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use walkdir::WalkDir;

use crate::types::{ArticleAttributes, Author, DEFAULT_POSITION};

/// Load validated article attributes from the given source directories.
///
/// Output order is deterministic: directories in the order given, files in
/// lexical path order within each directory.
pub fn load(sources: &[PathBuf]) -> Vec<ArticleAttributes> {
    let mut articles = Vec::new();
    for source in sources {
        for entry in WalkDir::new(source)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            if let Some(article) = load_pair(path) {
                articles.push(article);
            }
        }
    }
    articles
}

/// Load a single `.html` + `.yml` pair, or skip with a warning.
fn load_pair(html_path: &Path) -> Option<ArticleAttributes> {
    let file_name = html_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let yaml_path = html_path.with_extension("yml");
    if !yaml_path.exists() {
        log::warn!(
            "Missing YAML file: {}, unable to publish {file_name}",
            yaml_path.display()
        );
        return None;
    }
    let yaml_text = match std::fs::read_to_string(&yaml_path) {
        Ok(text) => text,
        Err(err) => {
            log::warn!(
                "Error while reading the YAML file: {}, unable to publish {file_name}: {err}",
                yaml_path.display()
            );
            return None;
        }
    };
    let attributes: Value = match serde_yaml::from_str(&yaml_text) {
        Ok(value) => value,
        Err(err) => {
            log::warn!(
                "Error while parsing the YAML file: {}, unable to publish {file_name}: {err}",
                yaml_path.display()
            );
            return None;
        }
    };
    let content = match std::fs::read_to_string(html_path) {
        Ok(text) => text,
        Err(err) => {
            log::warn!(
                "Error while reading {}, unable to publish {file_name}: {err}",
                html_path.display()
            );
            return None;
        }
    };
    let yaml_path_display = yaml_path.display().to_string();
    from_value(&attributes, content, &yaml_path_display, &file_name)
}

/// Validate a parsed attribute mapping into an [`ArticleAttributes`] record.
///
/// Returns `None` (after warning) when `slug` or `title` is missing, not a
/// string, or blank. All other fields fall back to their defaults when
/// absent or wrongly typed.
pub fn from_value(
    attributes: &Value,
    content: String,
    yaml_path: &str,
    file_name: &str,
) -> Option<ArticleAttributes> {
    log::debug!("Document attributes in the YAML file: {attributes:?}");
    let slug = mandatory_string(attributes, "slug", yaml_path, file_name)?;
    let title = mandatory_string(attributes, "title", yaml_path, file_name)?;
    Some(ArticleAttributes {
        slug,
        remote_id: numeric_id(attributes),
        title,
        author: author(attributes),
        tags: tags(attributes.get("tags")),
        position: position(attributes),
        promoted: bool_like(attributes.get("promoted")).unwrap_or(false),
        comments_disabled: bool_like(attributes.get("comments_disabled")),
        content,
    })
}

fn mandatory_string(
    attributes: &Value,
    name: &str,
    yaml_path: &str,
    file_name: &str,
) -> Option<String> {
    let Some(value) = attributes.get(name) else {
        log::warn!("No {name} found in: {yaml_path}, unable to publish {file_name}");
        return None;
    };
    let Some(value) = value.as_str() else {
        log::warn!("{name} must be a String in: {yaml_path}, unable to publish {file_name}");
        return None;
    };
    if value.trim().is_empty() {
        log::warn!("{name} must not be blank in: {yaml_path}, unable to publish {file_name}");
        return None;
    }
    Some(value.to_owned())
}

fn position(attributes: &Value) -> i64 {
    attributes
        .get("position")
        .and_then(Value::as_i64)
        .unwrap_or(DEFAULT_POSITION)
}

/// Accept a boolean or a boolean-like string; anything else is ignored.
fn bool_like(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => Some(s.eq_ignore_ascii_case("true")),
        _ => None,
    }
}

/// Tags must be a list; non-string elements are dropped; absent means empty.
fn tags(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Sequence(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_owned))
        .collect()
}

fn author(attributes: &Value) -> Option<Author> {
    let value = attributes.get("author")?;
    if !value.is_mapping() {
        return None;
    }
    let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_owned);
    Some(Author {
        name: field("name"),
        first_name: field("first_name"),
        last_name: field("last_name"),
        email: field("email"),
        tags: tags(value.get("tags")),
    })
}

/// `zendesk_id` coerced to a 64-bit integer when numeric.
fn numeric_id(attributes: &Value) -> Option<i64> {
    attributes.get("zendesk_id").and_then(Value::as_i64)
}
