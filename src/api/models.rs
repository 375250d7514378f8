//! M-Pesa API data models
//!
//! Each operation has a caller-facing argument struct and a borrowed payload
//! struct that serialises to the exact field names the gateway expects,
//! including its irregular capitalisation (`Securitycredential`,
//! `Occassion`, `RecieverIdentifierType`, ...).

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::password::StkPassword;

/// Parsed JSON body returned by every operation, passed through unmodified
pub type ApiResponse = Map<String, Value>;

/// Fixed `CommandID` for balance queries
pub const COMMAND_ACCOUNT_BALANCE: &str = "AccountBalance";
/// Fixed `CommandID` for transaction status queries
pub const COMMAND_TRANSACTION_STATUS: &str = "TransactionStatusQuery";
/// Fixed `CommandID` for reversals
pub const COMMAND_REVERSAL: &str = "TransactionReversal";
/// `RecieverIdentifierType` sent when the caller leaves it unset
pub const DEFAULT_RECEIVER_IDENTIFIER_TYPE: &str = "11";

// =============================================================================
// Account balance
// =============================================================================

/// Arguments for an account balance query
#[derive(Debug, Clone)]
pub struct BalanceQuery {
    pub initiator: String,
    pub security_credential: String,
    pub party_a: String,
    pub identifier_type: u32,
    pub remarks: String,
    pub queue_timeout_url: String,
    pub result_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BalanceQueryPayload<'a> {
    pub initiator: &'a str,
    pub security_credential: &'a str,
    #[serde(rename = "CommandID")]
    pub command_id: &'a str,
    pub party_a: &'a str,
    pub identifier_type: u32,
    pub remarks: &'a str,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: &'a str,
    #[serde(rename = "ResultURL")]
    pub result_url: &'a str,
}

impl BalanceQuery {
    pub fn payload(&self) -> BalanceQueryPayload<'_> {
        BalanceQueryPayload {
            initiator: &self.initiator,
            security_credential: &self.security_credential,
            command_id: COMMAND_ACCOUNT_BALANCE,
            party_a: &self.party_a,
            identifier_type: self.identifier_type,
            remarks: &self.remarks,
            queue_timeout_url: &self.queue_timeout_url,
            result_url: &self.result_url,
        }
    }
}

// =============================================================================
// Customer to business
// =============================================================================

/// Arguments for registering C2B confirmation/validation URLs
#[derive(Debug, Clone)]
pub struct RegisterUrls {
    pub short_code: u64,
    /// `Completed` or `Cancelled`: what to do when validation is unreachable
    pub response_type: String,
    pub confirmation_url: String,
    pub validation_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterUrlsPayload<'a> {
    pub short_code: u64,
    pub response_type: &'a str,
    #[serde(rename = "ConfirmationURL")]
    pub confirmation_url: &'a str,
    #[serde(rename = "ValidationURL")]
    pub validation_url: &'a str,
}

impl RegisterUrls {
    pub fn payload(&self) -> RegisterUrlsPayload<'_> {
        RegisterUrlsPayload {
            short_code: self.short_code,
            response_type: &self.response_type,
            confirmation_url: &self.confirmation_url,
            validation_url: &self.validation_url,
        }
    }
}

/// Arguments for a simulated C2B payment (sandbox only)
#[derive(Debug, Clone)]
pub struct SimulatePayment {
    pub short_code: u64,
    /// `CustomerPayBillOnline` or `CustomerBuyGoodsOnline`
    pub command_id: String,
    /// Whole units; the simulate endpoint takes an integer
    pub amount: u64,
    pub msisdn: u64,
    pub bill_ref_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SimulatePaymentPayload<'a> {
    pub short_code: u64,
    #[serde(rename = "CommandID")]
    pub command_id: &'a str,
    pub amount: u64,
    pub msisdn: u64,
    pub bill_ref_number: Option<&'a str>,
}

impl SimulatePayment {
    pub fn payload(&self) -> SimulatePaymentPayload<'_> {
        SimulatePaymentPayload {
            short_code: self.short_code,
            command_id: &self.command_id,
            amount: self.amount,
            msisdn: self.msisdn,
            bill_ref_number: self.bill_ref_number.as_deref(),
        }
    }
}

// =============================================================================
// Business to customer
// =============================================================================

/// Arguments for a B2C payout
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub originator_conversation_id: String,
    pub initiator_name: String,
    pub security_credential: String,
    /// `SalaryPayment`, `BusinessPayment` or `PromotionPayment`
    pub command_id: String,
    /// Sent as a string, unlike the C2B simulate amount
    pub amount: String,
    pub party_a: u64,
    pub party_b: u64,
    pub remarks: String,
    pub queue_timeout_url: String,
    pub result_url: String,
    pub occasion: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentRequestPayload<'a> {
    #[serde(rename = "OriginatorConversationID")]
    pub originator_conversation_id: &'a str,
    pub initiator_name: &'a str,
    pub security_credential: &'a str,
    #[serde(rename = "CommandID")]
    pub command_id: &'a str,
    pub amount: &'a str,
    pub party_a: u64,
    pub party_b: u64,
    pub remarks: &'a str,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: &'a str,
    #[serde(rename = "ResultURL")]
    pub result_url: &'a str,
    #[serde(rename = "Occassion")]
    pub occasion: Option<&'a str>,
}

impl PaymentRequest {
    pub fn payload(&self) -> PaymentRequestPayload<'_> {
        PaymentRequestPayload {
            originator_conversation_id: &self.originator_conversation_id,
            initiator_name: &self.initiator_name,
            security_credential: &self.security_credential,
            command_id: &self.command_id,
            amount: &self.amount,
            party_a: self.party_a,
            party_b: self.party_b,
            remarks: &self.remarks,
            queue_timeout_url: &self.queue_timeout_url,
            result_url: &self.result_url,
            occasion: self.occasion.as_deref(),
        }
    }
}

// =============================================================================
// Transaction status
// =============================================================================

/// Arguments for a transaction status query
#[derive(Debug, Clone)]
pub struct TransactionStatusQuery {
    pub security_credential: String,
    pub originator_conversation_id: String,
    pub party_a: String,
    pub identifier_type: String,
    pub transaction_id: String,
    pub remarks: String,
    pub initiator: String,
    pub result_url: String,
    pub queue_timeout_url: String,
    pub occasion: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionStatusPayload<'a> {
    #[serde(rename = "Securitycredential")]
    pub security_credential: &'a str,
    #[serde(rename = "OriginatorconversationID")]
    pub originator_conversation_id: &'a str,
    #[serde(rename = "CommandID")]
    pub command_id: &'a str,
    #[serde(rename = "PartyA")]
    pub party_a: &'a str,
    #[serde(rename = "IdentifierType")]
    pub identifier_type: &'a str,
    #[serde(rename = "Remarks")]
    pub remarks: &'a str,
    #[serde(rename = "Initiator")]
    pub initiator: &'a str,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: &'a str,
    #[serde(rename = "ResultURL")]
    pub result_url: &'a str,
    #[serde(rename = "TransactionID")]
    pub transaction_id: &'a str,
    #[serde(rename = "Occasion")]
    pub occasion: Option<&'a str>,
}

impl TransactionStatusQuery {
    pub fn payload(&self) -> TransactionStatusPayload<'_> {
        TransactionStatusPayload {
            security_credential: &self.security_credential,
            originator_conversation_id: &self.originator_conversation_id,
            command_id: COMMAND_TRANSACTION_STATUS,
            party_a: &self.party_a,
            identifier_type: &self.identifier_type,
            remarks: &self.remarks,
            initiator: &self.initiator,
            queue_timeout_url: &self.queue_timeout_url,
            result_url: &self.result_url,
            transaction_id: &self.transaction_id,
            occasion: self.occasion.as_deref(),
        }
    }
}

// =============================================================================
// M-Pesa Express (STK push)
// =============================================================================

/// Arguments for an STK push payment prompt
#[derive(Debug, Clone)]
pub struct StkPush {
    pub short_code: u64,
    pub pass_key: String,
    /// `CustomerPayBillOnline` or `CustomerBuyGoodsOnline`
    pub transaction_type: String,
    pub amount: u64,
    /// MSISDN sending the funds
    pub party_a: u64,
    /// MSISDN that receives the PIN prompt
    pub phone_number: u64,
    pub callback_url: String,
    pub account_reference: String,
    pub transaction_desc: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkPushPayload<'a> {
    pub business_short_code: u64,
    pub password: &'a str,
    pub timestamp: &'a str,
    pub transaction_type: &'a str,
    pub amount: u64,
    pub party_a: u64,
    pub party_b: u64,
    pub phone_number: u64,
    #[serde(rename = "CallBackURL")]
    pub callback_url: &'a str,
    pub account_reference: &'a str,
    pub transaction_desc: &'a str,
}

impl StkPush {
    /// Build the payload around an already derived password/timestamp pair
    pub fn payload<'a>(&'a self, derived: &'a StkPassword) -> StkPushPayload<'a> {
        StkPushPayload {
            business_short_code: self.short_code,
            password: &derived.password,
            timestamp: &derived.timestamp,
            transaction_type: &self.transaction_type,
            amount: self.amount,
            party_a: self.party_a,
            party_b: self.short_code,
            phone_number: self.phone_number,
            callback_url: &self.callback_url,
            account_reference: &self.account_reference,
            transaction_desc: &self.transaction_desc,
        }
    }
}

/// Arguments for querying the outcome of an STK push
#[derive(Debug, Clone)]
pub struct StkQuery {
    pub short_code: u64,
    pub pass_key: String,
    pub checkout_request_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkQueryPayload<'a> {
    pub business_short_code: u64,
    pub password: &'a str,
    pub timestamp: &'a str,
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: &'a str,
}

impl StkQuery {
    pub fn payload<'a>(&'a self, derived: &'a StkPassword) -> StkQueryPayload<'a> {
        StkQueryPayload {
            business_short_code: self.short_code,
            password: &derived.password,
            timestamp: &derived.timestamp,
            checkout_request_id: &self.checkout_request_id,
        }
    }
}

// =============================================================================
// Reversal
// =============================================================================

/// Arguments for reversing a completed transaction
#[derive(Debug, Clone)]
pub struct ReversalRequest {
    pub initiator: String,
    pub security_credential: String,
    pub transaction_id: String,
    pub amount: String,
    pub receiver_party: u64,
    /// Defaults to [`DEFAULT_RECEIVER_IDENTIFIER_TYPE`] when `None`
    pub receiver_identifier_type: Option<String>,
    pub result_url: String,
    pub queue_timeout_url: String,
    pub remarks: String,
    pub occasion: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReversalPayload<'a> {
    pub initiator: &'a str,
    pub security_credential: &'a str,
    #[serde(rename = "CommandID")]
    pub command_id: &'a str,
    #[serde(rename = "TransactionID")]
    pub transaction_id: &'a str,
    pub amount: &'a str,
    pub receiver_party: u64,
    #[serde(rename = "RecieverIdentifierType")]
    pub receiver_identifier_type: &'a str,
    #[serde(rename = "ResultURL")]
    pub result_url: &'a str,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: &'a str,
    pub remarks: &'a str,
    pub occasion: Option<&'a str>,
}

impl ReversalRequest {
    pub fn payload(&self) -> ReversalPayload<'_> {
        ReversalPayload {
            initiator: &self.initiator,
            security_credential: &self.security_credential,
            command_id: COMMAND_REVERSAL,
            transaction_id: &self.transaction_id,
            amount: &self.amount,
            receiver_party: self.receiver_party,
            receiver_identifier_type: self
                .receiver_identifier_type
                .as_deref()
                .unwrap_or(DEFAULT_RECEIVER_IDENTIFIER_TYPE),
            result_url: &self.result_url,
            queue_timeout_url: &self.queue_timeout_url,
            remarks: &self.remarks,
            occasion: self.occasion.as_deref(),
        }
    }
}
