//! Token acquisition
//!
//! Provides the Basic-Auth token provider shared by every API client.

pub mod token;

pub use token::{AccessToken, TokenProvider, TOKEN_PATH};
