//! Client for a Centrifugo-style realtime pub/sub server.
//!
//! Drives the server's admin HTTP API (publish, broadcast, presence,
//! history, unsubscribe, disconnect, channels, stats) and issues signed JWT
//! credentials that downstream clients present when connecting or
//! subscribing to private channels.
//!
//! # Features
//! - One async method per server command, funneled through a single
//!   `{"method", "params"}` POST endpoint
//! - Uniform outcome type: server replies and soft failures come back as a
//!   [`Reply`], only connectivity errors surface as `Err`
//! - HMAC-SHA256 connection and private-channel tokens
//! - Hex HMAC digests for verifying inbound webhook callbacks
//!
//! # Example
//! ```no_run
//! # async fn example() -> Result<(), centrifugo_client::Error> {
//! use centrifugo_client::{Client, Config};
//!
//! let config = Config::new("https://rt.example.com", "api-key", "secret")
//!     .token_issuer("app")
//!     .token_ttl(3600);
//! let client = Client::new(config)?;
//!
//! let reply = client
//!     .publish("news", serde_json::json!({"text": "hi"}), None)
//!     .await?;
//! if let Some(err) = reply.failure() {
//!     eprintln!("publish failed: {}", err.error);
//! }
//!
//! let token = client.connection_token("user-42")?;
//! println!("connection token: {token}");
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod sign;
mod token;
mod transport;
mod types;

pub use client::Client;
pub use config::Config;
pub use sign::generate_api_sign;
pub use token::{ConnectionClaims, PrivateChannelClaims, TokenIssuer};
pub use transport::{Transport, prepare_url};
pub use types::{Command, Error, Params, Reply, ReplyError};
