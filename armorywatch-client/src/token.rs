//! OAuth2 client-credentials token management.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::ClientError;

/// Tokens are refreshed this many seconds before the server-reported expiry.
const EXPIRY_MARGIN_SECS: u64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Response body of the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Obtains and caches a bearer token via the OAuth2 client-credentials flow.
///
/// The cached token is reused until shortly before its expiry, then
/// replaced on the next request. The cache is process-lifetime state owned
/// by the [`ArmoryClient`](crate::ArmoryClient); a failed exchange leaves
/// any previously cached token untouched.
#[derive(Debug)]
pub struct TokenManager {
    client_id: String,
    client_secret: String,
    token_url: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    /// Create a token manager for the given credentials and token endpoint.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: token_url.into(),
            cached: Mutex::new(None),
        }
    }

    /// Return a valid access token, exchanging credentials if the cache is
    /// empty or expired.
    ///
    /// Fails with [`ClientError::Auth`] when the token endpoint rejects the
    /// exchange. The lock is never held across the exchange await.
    pub async fn get_token(&self, http: &reqwest::Client) -> Result<String, ClientError> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        debug!(url = %self.token_url, "exchanging client credentials for access token");
        let response = http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Auth(format!(
                "token endpoint returned status {}",
                response.status()
            )));
        }

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        let ttl = grant.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        let token = CachedToken {
            access_token: grant.access_token,
            expires_at: Instant::now() + Duration::from_secs(ttl),
        };
        let access = token.access_token.clone();
        *self.cached.lock() = Some(token);

        info!("obtained access token, valid for {}s", ttl);
        Ok(access)
    }

    /// The cached token, if still within its validity window.
    fn cached_token(&self) -> Option<String> {
        let cached = self.cached.lock();
        cached
            .as_ref()
            .filter(|token| Instant::now() < token.expires_at)
            .map(|token| token.access_token.clone())
    }

    /// Drop the cached token, forcing a fresh exchange on next use.
    #[cfg(test)]
    fn invalidate(&self) {
        *self.cached.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TokenManager {
        TokenManager::new("id", "secret", "http://localhost/oauth/token")
    }

    #[test]
    fn starts_with_empty_cache() {
        assert!(manager().cached_token().is_none());
    }

    #[test]
    fn cached_token_returned_while_valid() {
        let manager = manager();
        *manager.cached.lock() = Some(CachedToken {
            access_token: "abc".to_string(),
            expires_at: Instant::now() + Duration::from_secs(60),
        });
        assert_eq!(manager.cached_token().as_deref(), Some("abc"));
    }

    #[test]
    fn expired_token_is_not_returned() {
        let manager = manager();
        *manager.cached.lock() = Some(CachedToken {
            access_token: "abc".to_string(),
            expires_at: Instant::now() - Duration::from_secs(1),
        });
        assert!(manager.cached_token().is_none());
    }

    #[test]
    fn invalidate_clears_cache() {
        let manager = manager();
        *manager.cached.lock() = Some(CachedToken {
            access_token: "abc".to_string(),
            expires_at: Instant::now() + Duration::from_secs(60),
        });
        manager.invalidate();
        assert!(manager.cached_token().is_none());
    }

    #[test]
    fn token_grant_defaults_expires_in() {
        let grant: TokenGrant = serde_json::from_str(r#"{"access_token": "t"}"#).unwrap();
        assert_eq!(grant.expires_in, 3600);

        let grant: TokenGrant =
            serde_json::from_str(r#"{"access_token": "t", "expires_in": 86399}"#).unwrap();
        assert_eq!(grant.expires_in, 86399);
    }
}
