//! M-Pesa API clients
//!
//! One client per API family. Every client owns its own token provider and
//! issues exactly one HTTP call per operation; nothing is cached or retried.

pub mod b2c;
pub mod balance;
pub mod c2b;
pub mod express;
pub mod models;
pub mod password;
pub mod reversal;
pub mod status;
pub mod transport;

pub use b2c::B2cClient;
pub use balance::BalanceClient;
pub use c2b::C2bClient;
pub use express::ExpressClient;
pub use models::*;
pub use password::{Clock, FixedClock, StkPassword, SystemClock};
pub use reversal::ReversalClient;
pub use status::TransactionStatusClient;
pub use transport::ApiTransport;
