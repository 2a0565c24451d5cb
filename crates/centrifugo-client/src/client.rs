//! Typed façade over the server API commands.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::config::Config;
use crate::sign::generate_api_sign;
use crate::token::TokenIssuer;
use crate::transport::Transport;
use crate::types::{Command, Error, Reply, ReplyError};

/// Client for the server's admin HTTP API plus token issuance.
///
/// Holds only immutable state behind an `Arc`; `Clone` is a cheap refcount
/// bump and concurrent use from multiple tasks is safe.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    transport: Transport,
    issuer: TokenIssuer,
    secret: String,
}

impl Client {
    /// Validate `config` and build the client. Fails fast on an empty
    /// `base_url` or `secret`, or an unreadable `ssl_key`.
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        let transport = Transport::new(&config)?;
        let issuer = TokenIssuer::new(&config);
        Ok(Self {
            inner: Arc::new(Inner {
                transport,
                issuer,
                secret: config.secret,
            }),
        })
    }

    /// Publish `data` into `channel`, optionally on behalf of `client`.
    pub async fn publish(
        &self,
        channel: &str,
        data: Value,
        client: Option<&str>,
    ) -> Result<Reply, Error> {
        self.send(Command::publish(channel, data, client)).await
    }

    /// Publish `data` into every channel in `channels`.
    pub async fn broadcast(
        &self,
        channels: &[&str],
        data: Value,
        client: Option<&str>,
    ) -> Result<Reply, Error> {
        self.send(Command::broadcast(channels, data, client)).await
    }

    /// Clients currently subscribed to `channel`.
    pub async fn presence(&self, channel: &str) -> Result<Reply, Error> {
        self.send(Command::presence(channel)).await
    }

    /// Last messages published into `channel`.
    pub async fn history(&self, channel: &str) -> Result<Reply, Error> {
        self.send(Command::history(channel)).await
    }

    /// Unsubscribe `user` from `channel`, or from all channels when `None`.
    pub async fn unsubscribe(
        &self,
        user: impl ToString,
        channel: Option<&str>,
    ) -> Result<Reply, Error> {
        self.send(Command::unsubscribe(user, channel)).await
    }

    /// Disconnect `user` from the server.
    pub async fn disconnect(&self, user: impl ToString) -> Result<Reply, Error> {
        self.send(Command::disconnect(user)).await
    }

    /// Currently active channels.
    pub async fn channels(&self) -> Result<Reply, Error> {
        self.send(Command::channels()).await
    }

    /// Stats about running server nodes.
    pub async fn stats(&self) -> Result<Reply, Error> {
        self.send(Command::stats()).await
    }

    /// Send a command and normalize the outcome.
    ///
    /// Connectivity failures ([`Error::Http`]) propagate unmodified; every
    /// other failure is absorbed into [`Reply::Failure`] carrying the method
    /// name, the error message, and the params that were sent. Callers
    /// inspect the [`Reply`] for routine server-side problems and only need
    /// explicit error handling for connectivity.
    pub async fn send(&self, command: Command) -> Result<Reply, Error> {
        match self.inner.transport.send(&command).await {
            Ok(value) => Ok(Reply::Success(value)),
            Err(Error::Http(e)) => Err(Error::Http(e)),
            Err(e) => {
                warn!(method = %command.method, error = %e, "command failed, returning failure reply");
                Ok(Reply::Failure(ReplyError {
                    method: command.method,
                    error: e.to_string(),
                    body: command.params,
                }))
            }
        }
    }

    /// Token authorizing `user_id` to open a realtime connection.
    pub fn connection_token(&self, user_id: &str) -> Result<String, Error> {
        self.inner.issuer.connection_token(user_id)
    }

    /// Token authorizing client `client` to subscribe to the private
    /// `channel`.
    pub fn private_channel_token(&self, client: &str, channel: &str) -> Result<String, Error> {
        self.inner.issuer.private_channel_token(client, channel)
    }

    /// Hex HMAC-SHA256 digest of `payload` under the configured secret, for
    /// verifying inbound callback signatures.
    pub fn api_sign(&self, payload: &str) -> Result<String, Error> {
        generate_api_sign(&self.inner.secret, payload)
    }
}
