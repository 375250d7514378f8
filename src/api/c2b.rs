//! Customer to business: URL registration and payment simulation

use tracing::{info, instrument};

use crate::{
    api::{
        models::{ApiResponse, RegisterUrls, SimulatePayment},
        transport::ApiTransport,
    },
    auth::{AccessToken, TokenProvider},
    config::Config,
    error::MpesaResult,
};

pub const REGISTER_URL_PATH: &str = "/mpesa/c2b/v1/registerurl";
pub const SIMULATE_PATH: &str = "/mpesa/c2b/v1/simulate";

/// Client for the C2B APIs
pub struct C2bClient {
    transport: ApiTransport,
}

impl C2bClient {
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

    /// Register the confirmation and validation callbacks for a short code
    #[instrument(skip(self, request), fields(short_code = request.short_code))]
    pub async fn register_urls(&self, request: &RegisterUrls) -> MpesaResult<ApiResponse> {
        info!("Registering C2B callback URLs");
        self.transport.post(REGISTER_URL_PATH, &request.payload()).await
    }

    /// Simulate a customer payment (sandbox only)
    #[instrument(skip(self, request), fields(short_code = request.short_code, amount = request.amount))]
    pub async fn simulate(&self, request: &SimulatePayment) -> MpesaResult<ApiResponse> {
        info!("Simulating C2B payment");
        self.transport.post(SIMULATE_PATH, &request.payload()).await
    }
}
