//! Signed, time-bounded credentials for downstream realtime clients.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::types::Error;

/// Claims of a connection token: authorizes `sub` to open a realtime
/// connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionClaims {
    pub iss: String,
    pub exp: u64,
    pub sub: String,
}

/// Claims of a private-channel token: authorizes client `client` to
/// subscribe to `channel`. Carries no `sub` claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateChannelClaims {
    pub iss: String,
    pub exp: u64,
    pub client: String,
    pub channel: String,
}

/// Issues HMAC-SHA256 signed JWTs from the configured secret, issuer, and
/// TTL. Holds no per-call state; tokens are created on demand and never
/// stored.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    issuer: String,
    ttl: u64,
}

impl TokenIssuer {
    pub fn new(config: &Config) -> Self {
        Self {
            key: EncodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.token_issuer.clone(),
            ttl: config.token_ttl,
        }
    }

    /// Token authorizing `user_id` to open a realtime connection. Expires
    /// `token_ttl` seconds from now.
    pub fn connection_token(&self, user_id: &str) -> Result<String, Error> {
        self.connection_token_at(user_id, now_secs())
    }

    /// Token authorizing client `client` to subscribe to the private
    /// `channel`. Expires `token_ttl` seconds from now.
    pub fn private_channel_token(&self, client: &str, channel: &str) -> Result<String, Error> {
        self.private_channel_token_at(client, channel, now_secs())
    }

    // The *_at variants take the issue time explicitly so signing stays a
    // pure function of (config, clock, inputs).

    fn connection_token_at(&self, user_id: &str, issued_at: u64) -> Result<String, Error> {
        let claims = ConnectionClaims {
            iss: self.issuer.clone(),
            exp: issued_at + self.ttl,
            sub: user_id.to_string(),
        };
        Ok(encode(&Header::default(), &claims, &self.key)?)
    }

    fn private_channel_token_at(
        &self,
        client: &str,
        channel: &str,
        issued_at: u64,
    ) -> Result<String, Error> {
        let claims = PrivateChannelClaims {
            iss: self.issuer.clone(),
            exp: issued_at + self.ttl,
            client: client.to_string(),
            channel: channel.to_string(),
        };
        Ok(encode(&Header::default(), &claims, &self.key)?)
    }
}

/// Current unix time in seconds.
fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

    fn issuer() -> TokenIssuer {
        let config = Config::new("https://rt.example.com", "K", "S")
            .token_issuer("app")
            .token_ttl(60);
        TokenIssuer::new(&config)
    }

    fn validation() -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.set_issuer(&["app"]);
        v
    }

    #[test]
    fn connection_token_claims() {
        let now = now_secs();
        let token = issuer().connection_token("user-1").unwrap();
        let data = decode::<ConnectionClaims>(
            &token,
            &DecodingKey::from_secret(b"S"),
            &validation(),
        )
        .unwrap();
        assert_eq!(data.claims.iss, "app");
        assert_eq!(data.claims.sub, "user-1");
        // exp = issue time + TTL, within clock resolution.
        let ttl = data.claims.exp - now;
        assert!((59..=61).contains(&ttl), "unexpected ttl {ttl}");
    }

    #[test]
    fn private_channel_token_claims() {
        let token = issuer().private_channel_token("client-1", "$private").unwrap();
        let data = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"S"),
            &validation(),
        )
        .unwrap();
        assert_eq!(data.claims["client"], "client-1");
        assert_eq!(data.claims["channel"], "$private");
        assert!(data.claims.get("sub").is_none());
    }

    #[test]
    fn header_is_hs256() {
        let token = issuer().connection_token("u").unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = issuer().connection_token("u").unwrap();
        let result = decode::<ConnectionClaims>(
            &token,
            &DecodingKey::from_secret(b"other"),
            &validation(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn issue_time_determines_expiry() {
        let token = issuer().connection_token_at("u", 1_700_000_000).unwrap();
        let mut v = validation();
        v.validate_exp = false; // fixed issue time is in the past
        let data =
            decode::<ConnectionClaims>(&token, &DecodingKey::from_secret(b"S"), &v).unwrap();
        assert_eq!(data.claims.exp, 1_700_000_060);
    }
}
