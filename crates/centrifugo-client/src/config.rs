//! Client configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::Error;

/// Default lifetime of issued tokens, in seconds.
pub(crate) const DEFAULT_TOKEN_TTL: u64 = 3600;

/// Immutable settings shared by the transport, the token issuer, and the
/// signing helper. Validated once at client construction; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Server API endpoint, e.g. `https://rt.example.com`. The `/api` suffix
    /// is appended automatically if missing.
    pub base_url: String,
    /// API key sent in the `Authorization: apikey <key>` header.
    pub api_key: String,
    /// Shared secret used to sign tokens and verify callback signatures.
    pub secret: String,
    /// Value of the `iss` claim in issued tokens.
    #[serde(default)]
    pub token_issuer: String,
    /// Lifetime of issued tokens, in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl: u64,
    /// Verify the server's TLS certificate. Off by default to match servers
    /// running with self-signed certificates.
    #[serde(default)]
    pub verify: bool,
    /// Optional client key/certificate PEM presented during the TLS handshake.
    #[serde(default)]
    pub ssl_key: Option<PathBuf>,
}

fn default_token_ttl() -> u64 {
    DEFAULT_TOKEN_TTL
}

impl Config {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            secret: secret.into(),
            token_issuer: String::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
            verify: false,
            ssl_key: None,
        }
    }

    pub fn token_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.token_issuer = issuer.into();
        self
    }

    pub fn token_ttl(mut self, seconds: u64) -> Self {
        self.token_ttl = seconds;
        self
    }

    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn ssl_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssl_key = Some(path.into());
        self
    }

    /// Fail fast on settings the client cannot work without.
    pub fn validate(&self) -> Result<(), Error> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url must not be empty".into()));
        }
        if self.secret.is_empty() {
            return Err(Error::Config("secret must not be empty".into()));
        }
        Ok(())
    }
}
