//! Transaction reversal

use tracing::{info, instrument};

use crate::{
    api::{
        models::{ApiResponse, ReversalRequest},
        transport::ApiTransport,
    },
    auth::{AccessToken, TokenProvider},
    config::Config,
    error::MpesaResult,
};

pub const REVERSAL_PATH: &str = "/mpesa/reversal/v1/request";

/// Client for the reversal API
pub struct ReversalClient {
    transport: ApiTransport,
}

impl ReversalClient {
    /// Authenticate with `config` and create the client
    pub async fn connect(config: Config) -> MpesaResult<Self> {
        Ok(Self {
            transport: ApiTransport::connect(config).await?,
        })
    }

    /// Create the client around an already authenticated provider
    pub fn with_provider(auth: TokenProvider) -> MpesaResult<Self> {
        Ok(Self {
            transport: ApiTransport::from_provider(auth)?,
        })
    }

    pub fn token(&self) -> &AccessToken {
        self.transport.token()
    }

    pub async fn refresh_token(&mut self) -> MpesaResult<()> {
        self.transport.refresh().await
    }

    /// Request reversal of a completed transaction
    #[instrument(skip(self, request), fields(transaction_id = %request.transaction_id))]
    pub async fn reverse(&self, request: &ReversalRequest) -> MpesaResult<ApiResponse> {
        info!("Submitting reversal request");
        self.transport.post(REVERSAL_PATH, &request.payload()).await
    }
}
