//! Business to customer payouts

use tracing::{info, instrument};

use crate::{
    api::{
        models::{ApiResponse, PaymentRequest},
        transport::ApiTransport,
    },
    auth::{AccessToken, TokenProvider},
    config::Config,
    error::MpesaResult,
};

pub const PAYMENT_REQUEST_PATH: &str = "/mpesa/b2c/v3/paymentrequest";

/// Client for the B2C payout API
pub struct B2cClient {
    transport: ApiTransport,
}

impl B2cClient {
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

    /// Send money from a business short code to a customer
    #[instrument(
        skip(self, request),
        fields(
            originator_conversation_id = %request.originator_conversation_id,
            command_id = %request.command_id,
        )
    )]
    pub async fn payment_request(&self, request: &PaymentRequest) -> MpesaResult<ApiResponse> {
        info!("Submitting B2C payment request");
        self.transport
            .post(PAYMENT_REQUEST_PATH, &request.payload())
            .await
    }
}
