//! Account balance query

use tracing::{info, instrument};

use crate::{
    api::{
        models::{ApiResponse, BalanceQuery},
        transport::ApiTransport,
    },
    auth::{AccessToken, TokenProvider},
    config::Config,
    error::MpesaResult,
};

pub const BALANCE_PATH: &str = "/mpesa/accountbalance/v1/query";

/// Client for the account balance API
pub struct BalanceClient {
    transport: ApiTransport,
}

impl BalanceClient {
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

    /// Request the balance of `party_a`
    ///
    /// The gateway answers synchronously with an acknowledgement; the balance
    /// itself is delivered to `result_url`.
    #[instrument(skip(self, query), fields(party_a = %query.party_a))]
    pub async fn query(&self, query: &BalanceQuery) -> MpesaResult<ApiResponse> {
        info!("Submitting account balance query");
        self.transport.post(BALANCE_PATH, &query.payload()).await
    }
}
