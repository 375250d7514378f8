//! M-Pesa Express: STK push and STK push status query

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    api::{
        models::{ApiResponse, StkPush, StkQuery},
        password::{Clock, StkPassword, SystemClock},
        transport::ApiTransport,
    },
    auth::{AccessToken, TokenProvider},
    config::Config,
    error::MpesaResult,
};

pub const STK_PUSH_PATH: &str = "/mpesa/stkpush/v1/processrequest";
pub const STK_QUERY_PATH: &str = "/mpesa/stkpushquery/v1/query";

/// Client for the M-Pesa Express (STK push) APIs
pub struct ExpressClient {
    transport: ApiTransport,
    clock: Arc<dyn Clock>,
}

impl ExpressClient {
    /// Authenticate with `config` and create the client
    pub async fn connect(config: Config) -> MpesaResult<Self> {
        Ok(Self {
            transport: ApiTransport::connect(config).await?,
            clock: Arc::new(SystemClock),
        })
    }

    /// Create the client around an already authenticated provider
    pub fn with_provider(auth: TokenProvider) -> MpesaResult<Self> {
        Ok(Self {
            transport: ApiTransport::from_provider(auth)?,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for `Timestamp`/`Password` derivation
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn token(&self) -> &AccessToken {
        self.transport.token()
    }

    pub async fn refresh_token(&mut self) -> MpesaResult<()> {
        self.transport.refresh().await
    }

    /// Prompt the payer's handset for their PIN
    #[instrument(skip(self, request), fields(short_code = request.short_code, amount = request.amount))]
    pub async fn stk_push(&self, request: &StkPush) -> MpesaResult<ApiResponse> {
        let derived = StkPassword::generate(request.short_code, &request.pass_key, self.clock.as_ref());
        debug!(timestamp = %derived.timestamp, "Derived STK password");

        info!("Submitting STK push");
        self.transport
            .post(STK_PUSH_PATH, &request.payload(&derived))
            .await
    }

    /// Query the outcome of an earlier STK push
    #[instrument(skip(self, request), fields(checkout_request_id = %request.checkout_request_id))]
    pub async fn stk_query(&self, request: &StkQuery) -> MpesaResult<ApiResponse> {
        let derived = StkPassword::generate(request.short_code, &request.pass_key, self.clock.as_ref());
        debug!(timestamp = %derived.timestamp, "Derived STK password");

        info!("Querying STK push status");
        self.transport
            .post(STK_QUERY_PATH, &request.payload(&derived))
            .await
    }
}
