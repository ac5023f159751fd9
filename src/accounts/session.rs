use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::state::AppState;

/// Cookie the session token rides in, both directions.
pub const SESSION_COOKIE: &str = "access_token_cookie";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("missing session cookie")]
    Missing,
    #[error("invalid or expired session")]
    Invalid,
    #[error("token signing failed: {0}")]
    Sign(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // normalized email
    pub iat: usize,
    pub exp: usize,
}

/// HS256 signing/verification keys plus the session TTL. Stateless: a token
/// is valid iff its signature checks out and it has not expired.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        let session = &state.config.session;
        Self::new(session.secret.as_bytes(), Duration::from_secs(session.ttl_secs))
    }
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn issue(&self, subject: &str) -> Result<String, SessionError> {
        self.issue_at(subject, OffsetDateTime::now_utc())
    }

    fn issue_at(&self, subject: &str, issued_at: OffsetDateTime) -> Result<String, SessionError> {
        let expires = issued_at + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.unix_timestamp() as usize,
            exp: expires.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| SessionError::Sign(e.to_string()))?;
        debug!(subject = %subject, "session token issued");
        Ok(token)
    }

    /// Returns the subject. Bad signature, malformed token and past expiry
    /// all collapse to `Invalid`.
    pub fn verify(&self, token: &str) -> Result<String, SessionError> {
        let validation = Validation::default();
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| SessionError::Invalid)?;
        debug!(subject = %data.claims.sub, "session token verified");
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> SessionKeys {
        SessionKeys::new(b"dev-secret", Duration::from_secs(3600))
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let keys = make_keys();
        let token = keys.issue("alice@x.com").expect("issue");
        let subject = keys.verify(&token).expect("verify");
        assert_eq!(subject, "alice@x.com");
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys();
        let issued = OffsetDateTime::now_utc() - TimeDuration::hours(2);
        let token = keys.issue_at("alice@x.com", issued).expect("issue");
        assert!(matches!(keys.verify(&token), Err(SessionError::Invalid)));
    }

    #[test]
    fn verify_accepts_token_within_ttl() {
        let keys = make_keys();
        let issued = OffsetDateTime::now_utc() - TimeDuration::minutes(30);
        let token = keys.issue_at("alice@x.com", issued).expect("issue");
        assert_eq!(keys.verify(&token).expect("verify"), "alice@x.com");
    }

    #[test]
    fn verify_rejects_foreign_signature() {
        let keys = make_keys();
        let other = SessionKeys::new(b"other-secret", Duration::from_secs(3600));
        let token = other.issue("alice@x.com").expect("issue");
        assert!(matches!(keys.verify(&token), Err(SessionError::Invalid)));
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys();
        assert!(matches!(keys.verify("not-a-token"), Err(SessionError::Invalid)));
    }
}
