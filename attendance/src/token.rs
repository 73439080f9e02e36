//! Rotating QR token codec.
//!
//! A token is `{class_id}.{issued_at}.{nonce}.{tag}` where `issued_at` is a
//! unix timestamp in seconds, `nonce` is random hex, and `tag` is an
//! HMAC-SHA256 over the first three dot-joined fields under a server-held
//! secret. Verification is stateless: the codec proves the token was minted
//! by this server and has not been altered, nothing more. Whether the token
//! is still live for its class is the broadcast registry's call.

use chrono::{DateTime, TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::ScanError;

type HmacSha256 = Hmac<Sha256>;

const NONCE_BYTES: usize = 8;

/// Claims carried inside a rotating QR token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub class_id: i64,
    pub issued_at: DateTime<Utc>,
    pub nonce: String,
}

/// Mints and verifies rotating QR tokens for class broadcasts.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Mints a token for `class_id` with a fresh random nonce.
    pub fn mint(&self, class_id: i64, issued_at: DateTime<Utc>) -> String {
        use rand::RngCore;
        let mut buf = [0u8; NONCE_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut buf);
        self.encode(class_id, issued_at, &hex::encode(buf))
    }

    /// Serializes the claims and appends the integrity tag.
    pub fn encode(&self, class_id: i64, issued_at: DateTime<Utc>, nonce: &str) -> String {
        let body = format!("{}.{}.{}", class_id, issued_at.timestamp(), nonce);
        let mut mac = self.mac();
        mac.update(body.as_bytes());
        let tag = hex::encode(mac.finalize().into_bytes());
        format!("{body}.{tag}")
    }

    /// Verifies the integrity tag and parses the claims back out.
    ///
    /// Fails with [`ScanError::InvalidToken`] on any structural or tag
    /// mismatch. The tag is checked in constant time before any field is
    /// trusted.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, ScanError> {
        let (body, tag) = token.rsplit_once('.').ok_or(ScanError::InvalidToken)?;
        let tag = hex::decode(tag).map_err(|_| ScanError::InvalidToken)?;

        let mut mac = self.mac();
        mac.update(body.as_bytes());
        mac.verify_slice(&tag).map_err(|_| ScanError::InvalidToken)?;

        let mut fields = body.split('.');
        let (Some(class_id), Some(issued_at), Some(nonce), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ScanError::InvalidToken);
        };

        let class_id = class_id.parse().map_err(|_| ScanError::InvalidToken)?;
        let secs: i64 = issued_at.parse().map_err(|_| ScanError::InvalidToken)?;
        let issued_at = Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or(ScanError::InvalidToken)?;

        Ok(TokenClaims {
            class_id,
            issued_at,
            nonce: nonce.to_string(),
        })
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC key")
    }
}
