//! Service account authentication against Google's OAuth endpoint.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::StoreError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Serialize, PartialEq)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Hands out bearer tokens for a service account,
/// reusing a token until shortly before it expires.
pub struct TokenSource {
    client_email: String,
    private_key: String,
    key_id: Option<String>,
    http: reqwest::Client,
    cached: Mutex<Option<AccessToken>>,
}

impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSource")
            .field("client_email", &self.client_email)
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

impl TokenSource {
    pub fn new(
        client_email: impl Into<String>,
        private_key: impl Into<String>,
        key_id: Option<String>,
        http: reqwest::Client,
    ) -> Self {
        TokenSource {
            client_email: client_email.into(),
            private_key: private_key.into(),
            key_id,
            http,
            cached: Mutex::new(None),
        }
    }

    fn claims(&self, now: DateTime<Utc>) -> Claims<'_> {
        Claims {
            iss: &self.client_email,
            scope: SCOPE,
            aud: TOKEN_URL,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        }
    }

    /// Signed JWT assertion for the token exchange
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String, StoreError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();
        Ok(jsonwebtoken::encode(&header, &self.claims(now), &key)?)
    }

    /// A valid access token, fetching a new one if needed
    pub async fn token(&self) -> Result<String, StoreError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::minutes(1) > now {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.assertion(now)?;
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StoreError::Auth(format!("status {}: {}", status.as_u16(), body)));
        }

        let issued: TokenResponse = response.json().await?;
        tracing::debug!(expires_in = issued.expires_in, "issued access token");
        *cached = Some(AccessToken {
            value: issued.access_token.clone(),
            expires_at: now + Duration::seconds(issued.expires_in),
        });
        Ok(issued.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn source(key: &str) -> TokenSource {
        TokenSource::new(
            "ledger@project.iam.gserviceaccount.com",
            key,
            Some("key-1".to_string()),
            reqwest::Client::new(),
        )
    }

    #[test]
    fn test_claims() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let source = source("unused");
        let claims = source.claims(now);
        assert_eq!(claims.iss, "ledger@project.iam.gserviceaccount.com");
        assert_eq!(claims.scope, SCOPE);
        assert_eq!(claims.aud, TOKEN_URL);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let result = source("not a key").assertion(Utc::now());
        assert!(matches!(result, Err(StoreError::Token(_))));
    }

    #[test]
    fn test_debug_hides_key() {
        let debug = format!("{:?}", source("SECRET"));
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("ledger@project"));
    }
}
