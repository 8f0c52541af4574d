//! Bearer token expiry decoding.
//!
//! Access tokens are JWTs. Only the payload segment is inspected, for its `exp`
//! claim; signatures are the server's concern. Anything that cannot be decoded
//! is treated as expired.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
  exp: Option<i64>,
}

/// Decode the `exp` claim of a token, if it has a readable one.
pub fn decode_expiry(token: &str) -> Option<DateTime<Utc>> {
  let mut segments = token.split('.');
  let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
  if segments.next().is_some() {
    return None;
  }

  let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
  let claims: Claims = serde_json::from_slice(&bytes).ok()?;

  DateTime::from_timestamp(claims.exp?, 0)
}

/// Whether the token is expired at `now`. Undecodable tokens count as expired.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
  match decode_expiry(token) {
    Some(expires_at) => expires_at <= now,
    None => true,
  }
}

pub fn is_expired(token: &str) -> bool {
  is_expired_at(token, Utc::now())
}

/// Build an unsigned token carrying the given claims. Test helper.
#[cfg(test)]
pub fn encode_test_token(claims: serde_json::Value) -> String {
  let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS512"}"#);
  let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
  format!("{}.{}.signature", header, payload)
}

/// A token expiring `secs` seconds from now (negative for the past). Test helper.
#[cfg(test)]
pub fn token_expiring_in(secs: i64) -> String {
  let exp = Utc::now().timestamp() + secs;
  encode_test_token(serde_json::json!({ "sub": "alice", "exp": exp }))
}
