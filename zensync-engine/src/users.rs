//! Author resolution with run-scoped caching.
//!
//! Each distinct author key (email when present, else name) triggers at
//! most one user search per run; both found ids and "not found" outcomes
//! are cached.

use std::collections::HashMap;

use serde_json::Value;
use zensync_client::RemoteClient;
use zensync_core::Author;

/// Run-scoped cache: author key to resolved user id, `None` meaning a
/// cached "not found".
pub type AuthorCache = HashMap<String, Option<i64>>;

/// Resolve an author to a remote user id.
///
/// Returns `None` without a request when the author has neither email nor
/// name, or when the search finds nobody. Search failures resolve to "not
/// found" and are cached like any other outcome.
pub fn resolve<C: RemoteClient>(
    client: &C,
    author: &Author,
    cache: &mut AuthorCache,
) -> Option<i64> {
    let key = author.key()?.to_owned();
    if let Some(cached) = cache.get(&key) {
        return *cached;
    }
    let resolved = search(client, author);
    cache.insert(key, resolved);
    resolved
}

fn search<C: RemoteClient>(client: &C, author: &Author) -> Option<i64> {
    let query = search_query(author)?;
    let path = format!("search.json?query={}", urlencoding::encode(&query));
    let response = match client.get(&path) {
        Ok(json) => json,
        Err(err) => {
            log::error!("Unable to search for user {query:?}: {err}");
            return None;
        }
    };
    first_result_id(&response)
}

/// `type:user email:{e}`, or `type:user name:{n}` with one `tags:{t}` term
/// per declared author tag.
fn search_query(author: &Author) -> Option<String> {
    if let Some(email) = &author.email {
        return Some(format!("type:user email:{email}"));
    }
    let name = author.name.as_ref()?;
    let mut query = format!("type:user name:{name}");
    for tag in &author.tags {
        query.push_str(&format!(" tags:{tag}"));
    }
    Some(query)
}

fn first_result_id(response: &Value) -> Option<i64> {
    response
        .get("results")
        .and_then(Value::as_array)?
        .first()?
        .get("id")
        .and_then(Value::as_i64)
}
