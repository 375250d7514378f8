//! mpesa-auth-check - verify M-Pesa credentials
//!
//! Loads configuration from the environment (and `.env`), requests an access
//! token and reports the outcome. The token itself is never printed.

use anyhow::Result;
use tracing::{error, info};

use mpesa::{Config, TokenProvider};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mpesa=info,mpesa_auth_check=info".into());
    let json_logs = std::env::var("MPESA_LOG_JSON")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    let config = Config::from_env()?;
    info!(
        environment = %config.environment,
        base_url = %config.base_url(),
        "Configuration loaded"
    );

    let mut provider = TokenProvider::new(config)?;
    match provider.authenticate().await {
        Ok(token) => {
            info!(expires_in = ?token.expires_in(), "Credentials accepted");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, status = ?e.status_code(), "Authentication failed");
            Err(e.into())
        }
    }
}
