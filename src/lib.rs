//! M-Pesa - async client for the M-Pesa (Daraja) payment gateway
//!
//! Each API family has its own client. Constructing a client authenticates
//! against the OAuth token endpoint; every operation then builds its JSON
//! payload, attaches the bearer token and performs a single POST.
//!
//! ```rust,no_run
//! use mpesa::{B2cClient, Config, Credentials, Environment, PaymentRequest};
//!
//! # async fn run() -> mpesa::MpesaResult<()> {
//! let config = Config::new(Environment::Sandbox, Credentials::new("key", "secret"));
//! let b2c = B2cClient::connect(config).await?;
//!
//! let response = b2c
//!     .payment_request(&PaymentRequest {
//!         originator_conversation_id: "feb5e3f2-fbbc-4745-844c-ee37b546f627".into(),
//!         initiator_name: "testapi".into(),
//!         security_credential: "encrypted-credential".into(),
//!         command_id: "BusinessPayment".into(),
//!         amount: "10".into(),
//!         party_a: 600996,
//!         party_b: 254728762287,
//!         remarks: "Test payout".into(),
//!         queue_timeout_url: "https://example.com/b2c/timeout".into(),
//!         result_url: "https://example.com/b2c/result".into(),
//!         occasion: None,
//!     })
//!     .await?;
//! assert_eq!(response["ResponseCode"], "0");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;

pub use crate::api::{
    ApiResponse, B2cClient, BalanceClient, BalanceQuery, C2bClient, Clock, ExpressClient,
    FixedClock, PaymentRequest, RegisterUrls, ReversalClient, ReversalRequest, SimulatePayment,
    StkPassword, StkPush, StkQuery, SystemClock, TransactionStatusClient, TransactionStatusQuery,
};
pub use crate::auth::{AccessToken, TokenProvider};
pub use crate::config::{Config, Credentials, Environment};
pub use crate::error::{MpesaError, MpesaResult, RequestFailure};
