//! OAuth token provider
//!
//! Exchanges the consumer key/secret for a bearer token using HTTP Basic
//! authentication. A token is fetched once and kept until [`TokenProvider::refresh`]
//! is called explicitly; expiry is never tracked automatically.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::Config,
    error::{MpesaError, MpesaResult},
};

/// Path of the token endpoint, relative to the environment base URL
pub const TOKEN_PATH: &str = "/oauth/v1/generate";

/// Body returned by the token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    /// Sent as a string by the live gateway and as a number by some mocks
    #[serde(default, deserialize_with = "lenient_seconds")]
    expires_in: Option<u64>,
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A bearer token issued by the gateway
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    header: HeaderValue,
    expires_in: Option<Duration>,
}

impl AccessToken {
    fn new(value: String, expires_in: Option<u64>) -> Result<Self, String> {
        let mut header = HeaderValue::from_str(&format!("Bearer {}", value))
            .map_err(|_| "access_token contains characters not allowed in a header".to_string())?;
        header.set_sensitive(true);

        Ok(Self {
            value,
            header,
            expires_in: expires_in.map(Duration::from_secs),
        })
    }

    /// The raw token string
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Lifetime hint reported by the gateway at issue time
    pub fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }

    /// Ready-made `Authorization: Bearer ...` header value
    pub(crate) fn authorization(&self) -> HeaderValue {
        self.header.clone()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Fetches and holds the bearer token for one client instance
pub struct TokenProvider {
    http: reqwest::Client,
    config: Config,
    token: Option<AccessToken>,
}

impl TokenProvider {
    /// Create a provider with its own HTTP client, honouring the configured timeout
    pub fn new(config: Config) -> MpesaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                MpesaError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self::with_client(http, config))
    }

    /// Create a provider around an existing HTTP client
    pub fn with_client(http: reqwest::Client, config: Config) -> Self {
        Self {
            http,
            config,
            token: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// The most recently acquired token, if any
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Request a token from the gateway and store it on the provider
    ///
    /// Credentials are checked before any network traffic. A non-2xx status,
    /// an unreadable body, or a body without `access_token` all fail; the
    /// previously stored token (if any) is left untouched in that case.
    #[instrument(skip(self), fields(environment = %self.config.environment))]
    pub async fn authenticate(&mut self) -> MpesaResult<&AccessToken> {
        self.config.credentials.validate()?;

        let url = self.config.endpoint(TOKEN_PATH);
        debug!(url = %url, "Requesting access token");

        let response = self
            .http
            .get(&url)
            .query(&[("grant_type", "client_credentials")])
            .basic_auth(
                &self.config.credentials.consumer_key,
                Some(&self.config.credentials.consumer_secret),
            )
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send token request");
                MpesaError::transport(&url, e)
            })?;

        let status = response.status();
        debug!(status = %status, "Token response status");

        let body = response
            .text()
            .await
            .map_err(|e| MpesaError::transport(&url, e))?;

        if !status.is_success() {
            warn!(status = %status, body = %body, "Token request rejected");
            return Err(MpesaError::HttpStatus {
                status: status.as_u16(),
                endpoint: url,
                body,
            });
        }

        let parsed: TokenResponse = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, body = %body, "Failed to parse token response");
                return Err(MpesaError::ResponseFormat {
                    endpoint: url,
                    message: format!("token response is not valid JSON: {}", e),
                });
            }
        };

        let value = match parsed.access_token {
            Some(token) if !token.is_empty() => token,
            _ => {
                error!(body = %body, "Token response has no access_token");
                return Err(MpesaError::ResponseFormat {
                    endpoint: url,
                    message: "access_token not found in response".to_string(),
                });
            }
        };

        let token = AccessToken::new(value, parsed.expires_in).map_err(|message| {
            MpesaError::ResponseFormat {
                endpoint: url.clone(),
                message,
            }
        })?;

        debug!(expires_in = ?parsed.expires_in, "Access token acquired");
        Ok(&*self.token.insert(token))
    }

    /// Explicitly fetch a fresh token, replacing the stored one on success
    pub async fn refresh(&mut self) -> MpesaResult<&AccessToken> {
        info!("Refreshing access token");
        self.authenticate().await
    }
}
