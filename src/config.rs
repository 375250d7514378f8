//! Configuration management for the M-Pesa client
//!
//! A [`Config`] is passed explicitly to every client. It can be built in code
//! or loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::error::{MpesaError, MpesaResult};

/// Base URL for the sandbox environment
pub const SANDBOX_URL: &str = "https://sandbox.safaricom.co.ke";
/// Base URL for the production environment
pub const LIVE_URL: &str = "https://safaricom.co.ke";
/// Default request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Gateway environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl FromStr for Environment {
    type Err = MpesaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "development" => Ok(Environment::Sandbox),
            "production" | "live" => Ok(Environment::Production),
            other => Err(MpesaError::Configuration(format!(
                "unknown environment '{}', expected 'sandbox' or 'production'",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => f.write_str("sandbox"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// Consumer key and secret issued by the developer portal
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Both key and secret must be non-empty before any authenticated call
    pub fn validate(&self) -> MpesaResult<()> {
        if self.consumer_key.trim().is_empty() || self.consumer_secret.trim().is_empty() {
            return Err(MpesaError::Configuration(
                "consumer key and consumer secret must be provided for authentication".to_string(),
            ));
        }
        Ok(())
    }
}

// The secret must never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Which base URL requests go to
    pub environment: Environment,
    /// App credentials used for token acquisition
    pub credentials: Credentials,
    /// Sandbox base URL (overridable, e.g. for a local mock)
    pub sandbox_url: String,
    /// Production base URL
    pub live_url: String,
    /// Per-request timeout applied by the HTTP client
    pub timeout: Duration,
}

impl Config {
    /// Create a configuration with the default base URLs and timeout
    pub fn new(environment: Environment, credentials: Credentials) -> Self {
        Self {
            environment,
            credentials,
            sandbox_url: SANDBOX_URL.to_string(),
            live_url: LIVE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    pub fn with_sandbox_url(mut self, url: impl Into<String>) -> Self {
        self.sandbox_url = url.into();
        self
    }

    pub fn with_live_url(mut self, url: impl Into<String>) -> Self {
        self.live_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL for the selected environment, without a trailing slash
    pub fn base_url(&self) -> &str {
        let url = match self.environment {
            Environment::Sandbox => &self.sandbox_url,
            Environment::Production => &self.live_url,
        };
        url.trim_end_matches('/')
    }

    /// Absolute URL for an API path such as `/mpesa/b2c/v3/paymentrequest`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Load configuration from environment variables
    ///
    /// Missing credentials are not an error here; they are rejected by the
    /// pre-flight check when a token is requested.
    pub fn from_env() -> Result<Self> {
        let environment: Environment = env::var("MPESA_ENVIRONMENT")
            .unwrap_or_else(|_| "sandbox".to_string())
            .parse()
            .context("Invalid MPESA_ENVIRONMENT")?;

        let credentials = Credentials::new(
            env::var("MPESA_CONSUMER_KEY").unwrap_or_default(),
            env::var("MPESA_CONSUMER_SECRET").unwrap_or_default(),
        );

        let timeout_seconds: u64 = env::var("MPESA_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECONDS.to_string())
            .parse()
            .context("Invalid MPESA_TIMEOUT_SECONDS")?;

        Ok(Self {
            environment,
            credentials,
            sandbox_url: env::var("MPESA_SANDBOX_URL").unwrap_or_else(|_| SANDBOX_URL.to_string()),
            live_url: env::var("MPESA_LIVE_URL").unwrap_or_else(|_| LIVE_URL.to_string()),
            timeout: Duration::from_secs(timeout_seconds),
        })
    }
}
