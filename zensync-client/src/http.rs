//! Blocking HTTP transport for the Help Center JSON API.
//!
//! All requests carry Basic auth of the form `{email}/token:{apiToken}` and
//! target paths relative to `{scheme}://{host}[:{port}]/api/v2`. A 401 is
//! re-challenged transparently up to 3 total attempts per request.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use zensync_core::ConnectionInfo;

use crate::error::ClientError;

/// Maximum attempts per request when the server answers an
/// authentication challenge.
const MAX_AUTH_ATTEMPTS: u32 = 3;

/// The request surface the sync engine depends on.
///
/// Paths are relative to the API base, already percent-encoded where needed.
/// Every method returns parsed JSON or a per-request failure; failures are
/// for the caller to absorb, not to propagate as run aborts.
pub trait RemoteClient {
    fn get(&self, path: &str) -> Result<Value, ClientError>;
    fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError>;
    fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError>;
}

/// Production [`RemoteClient`] over a blocking `ureq` agent.
pub struct HttpRemote {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
}

impl HttpRemote {
    pub fn new(connection: &ConnectionInfo) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connection.connect_timeout)
            .timeout_write(connection.write_timeout)
            .timeout_read(connection.read_timeout)
            .build();
        Self {
            agent,
            base_url: base_url(connection),
            authorization: basic_auth(&connection.email, &connection.api_token),
        }
    }

    fn execute(&self, method: &str, path: &str, body: Option<&Value>) -> Result<Value, ClientError> {
        let url = format!("{}/{path}", self.base_url);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let request = self
                .agent
                .request(method, &url)
                .set("Authorization", &self.authorization);
            let result = match body {
                Some(data) => request.send_json(data),
                None => request.call(),
            };
            match result {
                Ok(response) => return parse_response(response),
                Err(ureq::Error::Status(401, _)) if attempt < MAX_AUTH_ATTEMPTS => {
                    log::debug!("authentication challenge on {method} {url}, attempt {attempt}");
                }
                Err(ureq::Error::Status(code, response)) => {
                    let body = response.into_string().unwrap_or_default();
                    log::warn!(
                        "Request is unsuccessful - {{request: {method} {url}, code: {code}, response: {body}}}"
                    );
                    return Err(ClientError::Status { code, body });
                }
                Err(err) => return Err(ClientError::Transport(err.to_string())),
            }
        }
    }
}

impl RemoteClient for HttpRemote {
    fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.execute("GET", path, None)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.execute("POST", path, Some(body))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.execute("PUT", path, Some(body))
    }
}

fn parse_response(response: ureq::Response) -> Result<Value, ClientError> {
    let content_type = response.content_type().to_string();
    if content_type != "application/json" {
        return Err(ClientError::ContentType(content_type));
    }
    let body = response
        .into_string()
        .map_err(|err| ClientError::Transport(err.to_string()))?;
    if body.trim().is_empty() {
        return Err(ClientError::EmptyBody);
    }
    Ok(serde_json::from_str(&body)?)
}

/// `{scheme}://{host}[:{port}]/api/v2`
fn base_url(connection: &ConnectionInfo) -> String {
    match connection.port {
        Some(port) => format!(
            "{}://{}:{port}/api/v2",
            connection.scheme, connection.host
        ),
        None => format!("{}://{}/api/v2", connection.scheme, connection.host),
    }
}

/// `Basic base64({email}/token:{apiToken})`
fn basic_auth(email: &str, api_token: &str) -> String {
    let credential = format!("{email}/token:{api_token}");
    format!("Basic {}", STANDARD.encode(credential))
}
