//! HTTP exchange with the server's admin API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::types::{Command, Error};

/// Endpoint suffix for the server's HTTP API.
pub(crate) const API_PATH: &str = "/api";

/// Strip trailing slashes from `base_url` and append `/api` unless the URL
/// already ends with it (exact string comparison). Idempotent.
pub fn prepare_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(API_PATH) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{API_PATH}")
    }
}

/// TLS options applied when the API URL uses the `https` scheme. Assembled
/// once at transport construction; reqwest fixes TLS at client build time.
#[derive(Debug, Default)]
struct TlsOptions {
    verify: bool,
    identity_pem: Option<Vec<u8>>,
}

impl TlsOptions {
    fn from_config(config: &Config) -> Result<Self, Error> {
        let identity_pem = match &config.ssl_key {
            Some(path) => Some(std::fs::read(path).map_err(|e| {
                Error::Config(format!("ssl_key {}: {e}", path.display()))
            })?),
            None => None,
        };
        Ok(Self {
            verify: config.verify,
            identity_pem,
        })
    }

    fn apply(self, mut builder: reqwest::ClientBuilder) -> Result<reqwest::ClientBuilder, Error> {
        if !self.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(pem) = self.identity_pem {
            let identity = reqwest::Identity::from_pem(&pem)?;
            builder = builder.identity(identity);
        }
        Ok(builder)
    }
}

/// Turns a [`Command`] into an HTTP exchange against the prepared API URL.
///
/// Holds no per-call state; safe to share across tasks.
pub struct Transport {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl Transport {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let url = prepare_url(&config.base_url);
        let secure = url::Url::parse(&url)
            .map(|u| u.scheme() == "https")
            .unwrap_or(false);

        let mut builder = reqwest::Client::builder();
        if secure {
            builder = TlsOptions::from_config(config)?.apply(builder)?;
        }
        let client = builder.build()?;

        debug!(url = %url, secure, "transport initialized");

        Ok(Self {
            client,
            url,
            api_key: config.api_key.clone(),
        })
    }

    /// POST the command and decode the response body as JSON.
    ///
    /// Non-2xx statuses are not treated as errors at this level; their bodies
    /// are decoded and returned like any other response. A connectivity
    /// failure surfaces as [`Error::Http`]; an unreadable or non-JSON body as
    /// [`Error::Decode`]. An empty body decodes to `Value::Null`, which is
    /// distinct from a decode failure.
    pub async fn send(&self, command: &Command) -> Result<Value, Error> {
        debug!(method = %command.method, url = %self.url, "sending api command");

        let resp = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("apikey {}", self.api_key))
            .json(command)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, method = %command.method, "server returned non-success status");
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::Decode(format!("body read: {e}")))?;

        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| Error::Decode(format!("invalid JSON body: {e}")))
    }
}
