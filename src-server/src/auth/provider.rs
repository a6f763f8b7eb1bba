//! Identity provider client
//!
//! Builds the authorize and logout redirects for the OIDC tenant and
//! performs the back-channel calls: code exchange, userinfo and JWKS.

use jsonwebtoken::jwk::JwkSet;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::session::UserProfile;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Optional parameters forwarded from `/api/auth/login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginOptions {
    pub organization: Option<String>,
    pub invitation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Serialize)]
struct CodeExchange<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

pub struct IdentityProvider {
    domain: String,
    client_id: String,
    client_secret: String,
    audience: Option<String>,
    callback_url: String,
    http: reqwest::Client,
    jwks: RwLock<Option<JwkSet>>,
}

fn encode_query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, NON_ALPHANUMERIC)))
        .collect::<Vec<_>>()
        .join("&")
}

impl IdentityProvider {
    pub fn new(config: &Config) -> Self {
        let domain = config
            .identity
            .domain
            .trim_start_matches("https://")
            .trim_end_matches('/')
            .to_string();
        Self {
            domain,
            client_id: config.identity.client_id.clone(),
            client_secret: config.identity.client_secret.clone(),
            audience: config.identity.audience.clone(),
            callback_url: config.callback_url(),
            http: reqwest::Client::new(),
            jwks: RwLock::new(None),
        }
    }

    /// Issuer claim expected on access tokens.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    pub fn authorize_url(&self, state: &str, options: &LoginOptions) -> String {
        let mut pairs = vec![
            ("response_type", "code"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.callback_url.as_str()),
            ("scope", "openid profile email"),
            ("state", state),
        ];
        if let Some(audience) = &self.audience {
            pairs.push(("audience", audience.as_str()));
        }
        if let Some(org) = options.organization.as_deref().filter(|o| !o.is_empty()) {
            pairs.push(("organization", org));
        }
        if let Some(invitation) = options.invitation.as_deref().filter(|i| !i.is_empty()) {
            pairs.push(("invitation", invitation));
        }
        format!("https://{}/authorize?{}", self.domain, encode_query(&pairs))
    }

    pub fn logout_url(&self, return_to: &str) -> String {
        let pairs = [("client_id", self.client_id.as_str()), ("returnTo", return_to)];
        format!("https://{}/v2/logout?{}", self.domain, encode_query(&pairs))
    }

    pub async fn exchange_code(&self, code: &str) -> ApiResult<TokenSet> {
        let body = CodeExchange {
            grant_type: "authorization_code",
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            code,
            redirect_uri: &self.callback_url,
        };
        let response = self
            .http
            .post(format!("https://{}/oauth/token", self.domain))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "identity provider rejected code exchange");
            return Err(ApiError::Unauthorized(format!("Login failed ({})", status)));
        }

        response
            .json::<TokenSet>()
            .await
            .map_err(|e| ApiError::Upstream(format!("token response unreadable: {}", e)))
    }

    pub async fn user_info(&self, access_token: &str) -> ApiResult<UserProfile> {
        let response = self
            .http
            .get(format!("https://{}/userinfo", self.domain))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("userinfo failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!("userinfo returned {}", response.status())));
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| ApiError::Upstream(format!("userinfo unreadable: {}", e)))
    }

    /// Signing keys, fetched once and refetched when `refresh` is set
    /// (for example after a key rotation).
    pub async fn jwks(&self, refresh: bool) -> ApiResult<JwkSet> {
        if !refresh {
            if let Some(keys) = self.jwks.read().await.as_ref() {
                return Ok(keys.clone());
            }
        }

        debug!(domain = %self.domain, "fetching JWKS");
        let keys = self
            .http
            .get(format!("https://{}/.well-known/jwks.json", self.domain))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ApiError::Upstream(format!("JWKS fetch failed: {}", e)))?
            .json::<JwkSet>()
            .await
            .map_err(|e| ApiError::Upstream(format!("JWKS unreadable: {}", e)))?;

        *self.jwks.write().await = Some(keys.clone());
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentityConfig;

    fn provider(audience: Option<&str>) -> IdentityProvider {
        let config = Config {
            public_url: "https://portal.example.com".to_string(),
            identity: IdentityConfig {
                domain: "https://tenant.example.com/".to_string(),
                client_id: "abc".to_string(),
                client_secret: "secret".to_string(),
                audience: audience.map(str::to_string),
            },
            ..Config::default()
        };
        IdentityProvider::new(&config)
    }

    #[test]
    fn test_authorize_url_forwards_organization_and_invitation() {
        let url = provider(None).authorize_url(
            "xyz",
            &LoginOptions { organization: Some("org_123".into()), invitation: Some("inv 1".into()) },
        );

        assert!(url.starts_with("https://tenant.example.com/authorize?response_type=code&client_id=abc"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fportal%2Eexample%2Ecom%2Fapi%2Fauth%2Fcallback"));
        assert!(url.contains("&state=xyz"));
        assert!(url.contains("&organization=org%5F123"));
        assert!(url.contains("&invitation=inv%201"));
        assert!(!url.contains("audience="));
    }

    #[test]
    fn test_authorize_url_skips_empty_options() {
        let url = provider(Some("https://api.example.com")).authorize_url(
            "s",
            &LoginOptions { organization: Some(String::new()), invitation: None },
        );
        assert!(!url.contains("organization="));
        assert!(url.contains("audience=https%3A%2F%2Fapi%2Eexample%2Ecom"));
    }

    #[test]
    fn test_logout_url_and_issuer() {
        let p = provider(None);
        assert_eq!(p.issuer(), "https://tenant.example.com/");
        assert_eq!(
            p.logout_url("https://portal.example.com"),
            "https://tenant.example.com/v2/logout?client_id=abc&returnTo=https%3A%2F%2Fportal%2Eexample%2Ecom"
        );
    }
}
