//! Transaction status query

use tracing::{info, instrument};

use crate::{
    api::{
        models::{ApiResponse, TransactionStatusQuery},
        transport::ApiTransport,
    },
    auth::{AccessToken, TokenProvider},
    config::Config,
    error::MpesaResult,
};

pub const TRANSACTION_STATUS_PATH: &str = "/mpesa/transactionstatus/v1/query";

/// Client for the transaction status API
pub struct TransactionStatusClient {
    transport: ApiTransport,
}

impl TransactionStatusClient {
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

    /// Ask for the status of a transaction; the result arrives at `result_url`
    #[instrument(skip(self, query), fields(transaction_id = %query.transaction_id))]
    pub async fn query(&self, query: &TransactionStatusQuery) -> MpesaResult<ApiResponse> {
        info!("Submitting transaction status query");
        self.transport
            .post(TRANSACTION_STATUS_PATH, &query.payload())
            .await
    }
}
