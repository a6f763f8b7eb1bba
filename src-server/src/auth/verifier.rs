//! Bearer token verification
//!
//! `JwksVerifier` checks RS256 access tokens against the provider's
//! published keys, audience and issuer. Without a configured audience
//! the provider issues opaque tokens, so `SessionVerifier` accepts a
//! token only while it belongs to a live portal session.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::provider::IdentityProvider;
use super::session::SessionStore;
use crate::error::{ApiError, ApiResult};

/// Identity carried by a verified token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> ApiResult<Claims>;
}

fn rejected(reason: &str) -> ApiError {
    ApiError::Unauthorized(reason.to_string())
}

// ========================
// Session-backed tokens
// ========================

pub struct SessionVerifier {
    sessions: Arc<SessionStore>,
}

impl SessionVerifier {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl TokenVerifier for SessionVerifier {
    async fn verify(&self, token: &str) -> ApiResult<Claims> {
        let session = self
            .sessions
            .find_by_access_token(token)
            .await
            .ok_or_else(|| rejected("Unable to validate credentials"))?;
        Ok(Claims { sub: session.user.sub, email: session.user.email })
    }
}

// ========================
// JWT access tokens
// ========================

pub struct JwksVerifier {
    provider: Arc<IdentityProvider>,
    audience: String,
}

impl JwksVerifier {
    pub fn new(provider: Arc<IdentityProvider>, audience: String) -> Self {
        Self { provider, audience }
    }
}

fn jwt_rejection(kind: &ErrorKind) -> ApiError {
    match kind {
        ErrorKind::ExpiredSignature => rejected("Token has expired"),
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => {
            rejected("Invalid claims. Please check the audience and issuer")
        }
        _ => rejected("Unable to validate credentials"),
    }
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> ApiResult<Claims> {
        let header = decode_header(token).map_err(|_| rejected("Unable to validate credentials"))?;
        let kid = header.kid.ok_or_else(|| rejected("Unable to find appropriate key"))?;

        let keys = self.provider.jwks(false).await?;
        let jwk = match keys.find(&kid) {
            Some(jwk) => jwk.clone(),
            // Unknown kid: the tenant may have rotated keys since the last fetch
            None => self
                .provider
                .jwks(true)
                .await?
                .find(&kid)
                .cloned()
                .ok_or_else(|| rejected("Unable to find appropriate key"))?,
        };

        let key = DecodingKey::from_jwk(&jwk).map_err(|_| rejected("Unable to find appropriate key"))?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[self.provider.issuer()]);

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| jwt_rejection(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::UserProfile;
    use crate::config::Config;
    use std::time::Duration;

    #[tokio::test]
    async fn test_session_verifier() {
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(60)));
        sessions
            .create(
                UserProfile { sub: "auth0|7".into(), name: None, email: Some("a@b.c".into()), picture: None },
                "live-token".into(),
                None,
            )
            .await;
        let verifier = SessionVerifier::new(sessions);

        let claims = verifier.verify("live-token").await.unwrap();
        assert_eq!(claims.sub, "auth0|7");
        assert!(matches!(verifier.verify("stale").await, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_jwks_verifier_rejects_malformed_token_without_fetching() {
        let provider = Arc::new(IdentityProvider::new(&Config::default()));
        let verifier = JwksVerifier::new(provider, "https://api.example.com".into());

        let result = verifier.verify("not-a-jwt").await;
        assert!(matches!(result, Err(ApiError::Unauthorized(msg)) if msg == "Unable to validate credentials"));
    }

    #[test]
    fn test_jwt_rejection_messages() {
        assert_eq!(jwt_rejection(&ErrorKind::ExpiredSignature).to_string(), "Token has expired");
        assert_eq!(
            jwt_rejection(&ErrorKind::InvalidAudience).to_string(),
            "Invalid claims. Please check the audience and issuer"
        );
        assert_eq!(jwt_rejection(&ErrorKind::InvalidSignature).to_string(), "Unable to validate credentials");
    }
}
