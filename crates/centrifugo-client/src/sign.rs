//! Keyed-hash signing for inbound callback verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::types::Error;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 digest of `payload` under `secret`.
///
/// Used to verify signatures on webhook-style callbacks from the server;
/// deterministic for a given secret and payload.
pub fn generate_api_sign(secret: &str, payload: &str) -> Result<String, Error> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| Error::Sign(format!("HMAC key error: {e}")))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
