//! Authenticated request plumbing shared by every operation client

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::{
    api::models::ApiResponse,
    auth::{AccessToken, TokenProvider},
    config::Config,
    error::{MpesaError, MpesaResult},
};

/// Owns the token provider and the token it issued
pub struct ApiTransport {
    auth: TokenProvider,
    token: AccessToken,
}

impl ApiTransport {
    /// Build a provider from `config` and authenticate immediately
    pub async fn connect(config: Config) -> MpesaResult<Self> {
        let mut auth = TokenProvider::new(config)?;
        let token = auth.authenticate().await?.clone();
        Ok(Self { auth, token })
    }

    /// Wrap a provider that has already authenticated
    pub fn from_provider(auth: TokenProvider) -> MpesaResult<Self> {
        let token = auth.token().cloned().ok_or_else(|| {
            MpesaError::Configuration("token provider has not authenticated yet".to_string())
        })?;
        Ok(Self { auth, token })
    }

    pub fn config(&self) -> &Config {
        self.auth.config()
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Fetch a new token; the current one is kept if this fails
    pub async fn refresh(&mut self) -> MpesaResult<()> {
        self.token = self.auth.refresh().await?.clone();
        Ok(())
    }

    /// POST `payload` as JSON to `path` and return the parsed body
    #[instrument(skip(self, payload), fields(path = %path))]
    pub async fn post<T>(&self, path: &str, payload: &T) -> MpesaResult<ApiResponse>
    where
        T: Serialize + ?Sized,
    {
        let url = self.config().endpoint(path);
        debug!(url = %url, "Sending request to M-Pesa");

        let response = self
            .auth
            .http_client()
            .post(&url)
            .headers(self.bearer_headers())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send request to M-Pesa");
                MpesaError::transport(&url, e)
            })?;

        let status = response.status();
        debug!(status = %status, "M-Pesa response status");

        let body = response
            .text()
            .await
            .map_err(|e| MpesaError::transport(&url, e))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "M-Pesa request failed");
            return Err(MpesaError::HttpStatus {
                status: status.as_u16(),
                endpoint: url,
                body,
            });
        }

        let value: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, body = %body, "Failed to parse M-Pesa response");
                return Err(MpesaError::body(&url, e));
            }
        };

        match value {
            Value::Object(map) => {
                debug!(fields = map.len(), "M-Pesa request succeeded");
                Ok(map)
            }
            other => Err(MpesaError::ResponseFormat {
                endpoint: url,
                message: format!("expected a JSON object, got {}", other),
            }),
        }
    }

    fn bearer_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.token.authorization());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}
