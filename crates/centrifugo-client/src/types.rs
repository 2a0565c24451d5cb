//! Public types for the centrifugo-client crate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameter mapping sent alongside an API method name.
pub type Params = serde_json::Map<String, Value>;

/// A server API command. Serializes to the wire body
/// `{"method": ..., "params": ...}`. Built fresh per call, never reused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub method: String,
    pub params: Params,
}

impl Command {
    pub fn new(method: impl Into<String>, params: Params) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Publish `data` into `channel`, optionally on behalf of `client`.
    pub fn publish(channel: &str, data: Value, client: Option<&str>) -> Self {
        let mut params = Params::new();
        params.insert("channel".into(), Value::String(channel.into()));
        params.insert("data".into(), data);
        if let Some(client) = client {
            params.insert("client".into(), Value::String(client.into()));
        }
        Self::new("publish", params)
    }

    /// Publish `data` into every channel in `channels`.
    pub fn broadcast(channels: &[&str], data: Value, client: Option<&str>) -> Self {
        let mut params = Params::new();
        params.insert(
            "channels".into(),
            Value::Array(channels.iter().map(|c| Value::String((*c).into())).collect()),
        );
        params.insert("data".into(), data);
        if let Some(client) = client {
            params.insert("client".into(), Value::String(client.into()));
        }
        Self::new("broadcast", params)
    }

    pub fn presence(channel: &str) -> Self {
        let mut params = Params::new();
        params.insert("channel".into(), Value::String(channel.into()));
        Self::new("presence", params)
    }

    pub fn history(channel: &str) -> Self {
        let mut params = Params::new();
        params.insert("channel".into(), Value::String(channel.into()));
        Self::new("history", params)
    }

    /// Unsubscribe `user` from `channel` (all channels when `None`).
    ///
    /// The server expects the user ID as a string; numeric IDs are
    /// stringified here.
    pub fn unsubscribe(user: impl ToString, channel: Option<&str>) -> Self {
        let mut params = Params::new();
        params.insert("user".into(), Value::String(user.to_string()));
        if let Some(channel) = channel {
            params.insert("channel".into(), Value::String(channel.into()));
        }
        Self::new("unsubscribe", params)
    }

    pub fn disconnect(user: impl ToString) -> Self {
        let mut params = Params::new();
        params.insert("user".into(), Value::String(user.to_string()));
        Self::new("disconnect", params)
    }

    pub fn channels() -> Self {
        Self::new("channels", Params::new())
    }

    pub fn stats() -> Self {
        Self::new("stats", Params::new())
    }
}

/// Outcome of an API command.
///
/// Exactly one variant applies: the decoded server response on success, or a
/// structured failure descriptor when the exchange failed for a reason other
/// than connectivity (those propagate as [`Error::Http`] instead).
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Success(Value),
    Failure(ReplyError),
}

impl Reply {
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    /// The decoded server response, if the command succeeded.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Reply::Success(value) => Some(value),
            Reply::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Reply::Success(value) => Some(value),
            Reply::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ReplyError> {
        match self {
            Reply::Success(_) => None,
            Reply::Failure(err) => Some(err),
        }
    }
}

/// Failure descriptor carried by [`Reply::Failure`]: the command method, the
/// error message, and the original params that were sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyError {
    pub method: String,
    pub error: String,
    pub body: Params,
}

/// Errors returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// Connectivity-class failure from the HTTP client (DNS, connect, TLS
    /// handshake). Never absorbed into a [`Reply`].
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be read or was not valid JSON. Normalized
    /// into [`Reply::Failure`] at the client boundary.
    #[error("response decode error: {0}")]
    Decode(String),

    #[error("token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("signing error: {0}")]
    Sign(String),
}
