//! The request gateway: authenticated calls with a total status-code policy.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{ClientError, Namespace, Region, TokenManager};

/// The outcome of one resource fetch.
///
/// Callers never see transport errors: "no data" and "transport failure"
/// deliberately collapse into [`Payload::Empty`], because every metric has
/// a well-defined zero value. The gateway logs the two cases at different
/// levels so the distinction stays visible to operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A parsed JSON document.
    Document(Value),
    /// The resource is absent, or the fetch failed.
    Empty,
}

impl Payload {
    /// The document, or `None` when empty.
    pub fn document(&self) -> Option<&Value> {
        match self {
            Payload::Document(value) => Some(value),
            Payload::Empty => None,
        }
    }

    /// Look up a top-level field of the document.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document().and_then(|doc| doc.get(key))
    }

    /// Check whether this payload carries no document.
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Document(value)
    }
}

/// Authenticated client for the Battle.net data API.
///
/// Owns the HTTP connection pool and the cached bearer credential. Built
/// once per poller via [`ArmoryClient::builder`] and shared by reference;
/// the token cache is the only interior mutability.
///
/// # Example
///
/// ```rust,no_run
/// use armorywatch_client::{ArmoryClient, Region};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ArmoryClient::builder()
///         .region(Region::Eu)
///         .credentials("client-id", "client-secret")
///         .build();
///
///     let profile = client.character_profile("Twisting Nether", "Grommash").await?;
///     println!("profile present: {}", !profile.is_empty());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ArmoryClient {
    http: reqwest::Client,
    region: Region,
    api_url: String,
    locale: String,
    tokens: TokenManager,
    throttle_cooldown: Duration,
}

enum Fetched {
    Document(Value),
    Empty,
    Throttled,
}

impl ArmoryClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ArmoryClientBuilder {
        ArmoryClientBuilder::default()
    }

    /// The region this client talks to.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Issue an authenticated GET against the data API.
    ///
    /// Injects the bearer token and the locale parameter. Status policy,
    /// deterministic and total:
    ///
    /// | status | behavior |
    /// |---|---|
    /// | 200 | parsed document |
    /// | 404 | `Payload::Empty` (absent, not an error) |
    /// | 429 | sleep the throttle cooldown, retry once |
    /// | other | log, `Payload::Empty` |
    /// | network error | log, `Payload::Empty` |
    ///
    /// The only error that surfaces is a failed token exchange
    /// ([`ClientError::Auth`]), which is fatal for the rest of the cycle.
    pub async fn request(&self, endpoint: &str, namespace: Namespace) -> Result<Payload, ClientError> {
        match self.request_once(endpoint, namespace).await? {
            Fetched::Document(doc) => Ok(Payload::Document(doc)),
            Fetched::Empty => Ok(Payload::Empty),
            Fetched::Throttled => {
                warn!(
                    endpoint,
                    cooldown_secs = self.throttle_cooldown.as_secs(),
                    "rate limited, waiting before single retry"
                );
                tokio::time::sleep(self.throttle_cooldown).await;
                match self.request_once(endpoint, namespace).await? {
                    Fetched::Document(doc) => Ok(Payload::Document(doc)),
                    // A second 429 degrades like any other failure
                    Fetched::Empty | Fetched::Throttled => Ok(Payload::Empty),
                }
            }
        }
    }

    async fn request_once(&self, endpoint: &str, namespace: Namespace) -> Result<Fetched, ClientError> {
        let token = self.tokens.get_token(&self.http).await?;
        let url = format!("{}{}", self.api_url, endpoint);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("namespace", namespace.param(self.region).as_str()),
                ("locale", self.locale.as_str()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                error!(endpoint, error = %err, "request failed");
                return Ok(Fetched::Empty);
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<Value>().await {
                Ok(doc) => Ok(Fetched::Document(doc)),
                Err(err) => {
                    error!(endpoint, error = %err, "failed to parse response body");
                    Ok(Fetched::Empty)
                }
            },
            StatusCode::NOT_FOUND => {
                debug!(endpoint, "resource not found");
                Ok(Fetched::Empty)
            }
            StatusCode::TOO_MANY_REQUESTS => Ok(Fetched::Throttled),
            status => {
                warn!(endpoint, %status, "request returned non-success status");
                Ok(Fetched::Empty)
            }
        }
    }

    pub(crate) async fn get_token(&self) -> Result<String, ClientError> {
        self.tokens.get_token(&self.http).await
    }
}

/// Builder for [`ArmoryClient`].
#[derive(Debug, Default)]
pub struct ArmoryClientBuilder {
    region: Option<Region>,
    client_id: Option<String>,
    client_secret: Option<String>,
    locale: Option<String>,
    timeout: Option<Duration>,
    throttle_cooldown: Option<Duration>,
    api_url: Option<String>,
    token_url: Option<String>,
}

impl ArmoryClientBuilder {
    /// Set the API region (default: [`Region::Us`]).
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Set the OAuth2 client id and secret.
    pub fn credentials(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Override the locale parameter (default: the region's locale).
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the per-request timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the cooldown slept before the single throttling retry
    /// (default: 60 seconds).
    pub fn throttle_cooldown(mut self, cooldown: Duration) -> Self {
        self.throttle_cooldown = Some(cooldown);
        self
    }

    /// Override the data API base URL (default: the region's API host).
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Override the token endpoint URL (default: the region's token host).
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> ArmoryClient {
        let region = self.region.unwrap_or_default();
        let timeout = self.timeout.unwrap_or(Duration::from_secs(30));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        let tokens = TokenManager::new(
            self.client_id.unwrap_or_default(),
            self.client_secret.unwrap_or_default(),
            self.token_url.unwrap_or_else(|| region.token_url().to_string()),
        );

        ArmoryClient {
            http,
            region,
            api_url: self.api_url.unwrap_or_else(|| region.api_url().to_string()),
            locale: self.locale.unwrap_or_else(|| region.locale().to_string()),
            tokens,
            throttle_cooldown: self.throttle_cooldown.unwrap_or(Duration::from_secs(60)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_defaults() {
        let client = ArmoryClient::builder().build();
        assert_eq!(client.region(), Region::Us);
        assert_eq!(client.api_url, "https://us.api.blizzard.com");
        assert_eq!(client.locale, "en_US");
        assert_eq!(client.throttle_cooldown, Duration::from_secs(60));
    }

    #[test]
    fn builder_custom() {
        let client = ArmoryClient::builder()
            .region(Region::Eu)
            .credentials("id", "secret")
            .locale("de_DE")
            .throttle_cooldown(Duration::from_millis(10))
            .api_url("http://127.0.0.1:9999")
            .token_url("http://127.0.0.1:9999/oauth/token")
            .build();

        assert_eq!(client.region(), Region::Eu);
        assert_eq!(client.api_url, "http://127.0.0.1:9999");
        assert_eq!(client.locale, "de_DE");
        assert_eq!(client.throttle_cooldown, Duration::from_millis(10));
    }

    #[test]
    fn payload_accessors() {
        let doc = Payload::Document(json!({"money": 12345}));
        assert!(!doc.is_empty());
        assert_eq!(doc.get("money"), Some(&json!(12345)));
        assert!(doc.get("missing").is_none());

        let empty = Payload::Empty;
        assert!(empty.is_empty());
        assert!(empty.document().is_none());
        assert!(empty.get("anything").is_none());
    }

    #[test]
    fn payload_from_value() {
        let payload = Payload::from(json!({"level": 80}));
        assert_eq!(payload.get("level"), Some(&json!(80)));
    }
}
