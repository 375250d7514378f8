//! Mock infrastructure for testing external services
//!
//! This module provides a mock M-Pesa gateway and response factories used by
//! the integration tests. Mocks cover success, HTTP error, and malformed-body
//! scenarios.

#![allow(dead_code)]


pub use daraja::*;
