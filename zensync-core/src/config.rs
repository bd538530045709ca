//! Connection and publish configuration.
//!
//! Mirrors the external configuration surface: connection details on one
//! record, publish settings (with their mandatory numeric identifiers) on
//! another. Mandatory-property validation happens here, before any request
//! is issued.

use std::time::Duration;

use crate::error::ConfigError;

/// How to reach the remote Help Center API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub email: String,
    pub api_token: String,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    pub read_timeout: Duration,
}

impl ConnectionInfo {
    /// Build connection info with the default per-request timeouts
    /// (10s connect / 10s write / 30s read).
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: Option<u16>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
            email: email.into(),
            api_token: api_token.into(),
            connect_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
        }
    }
}

/// Per-run publish settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSettings {
    pub locale: String,
    pub user_segment_id: i64,
    pub permission_group_id: i64,
    pub section_id: i64,
    pub notify_subscribers: bool,
    /// Default for articles whose sidecar does not set `comments_disabled`.
    pub comments_disabled: Option<bool>,
}

impl PublishSettings {
    /// Validate the externally supplied settings.
    ///
    /// `user_segment_id`, `permission_group_id` and `section_id` are
    /// mandatory; a missing one aborts the whole run with a
    /// [`ConfigError`] before any network activity.
    pub fn from_options(
        locale: Option<String>,
        user_segment_id: Option<i64>,
        permission_group_id: Option<i64>,
        section_id: Option<i64>,
        notify_subscribers: Option<bool>,
        comments_disabled: Option<bool>,
    ) -> Result<Self, ConfigError> {
        let user_segment_id = user_segment_id.ok_or(ConfigError::MissingProperty {
            name: "userSegmentId",
        })?;
        let permission_group_id = permission_group_id.ok_or(ConfigError::MissingProperty {
            name: "permissionGroupId",
        })?;
        let section_id = section_id.ok_or(ConfigError::MissingProperty { name: "sectionId" })?;
        Ok(Self {
            locale: locale.unwrap_or_else(|| "en-us".to_string()),
            user_segment_id,
            permission_group_id,
            section_id,
            notify_subscribers: notify_subscribers.unwrap_or(true),
            comments_disabled,
        })
    }
}
