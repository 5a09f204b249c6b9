use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every SIMS PPOB endpoint wraps its payload in this envelope.
/// `status == 0` means success; anything else carries an error message.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Request body for POST /login
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `data` returned by POST /login
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// Request body for POST /registration
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Request body for PUT /profile/update
#[derive(Debug, Serialize)]
pub struct ProfileUpdateRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// `data` returned by GET /balance and POST /topup
#[derive(Debug, Deserialize)]
pub struct BalanceData {
    pub balance: i64,
}

/// Request body for POST /topup
#[derive(Debug, Serialize)]
pub struct TopUpRequest {
    pub top_up_amount: i64,
}

/// Request body for POST /transaction
#[derive(Debug, Serialize)]
pub struct PaymentRequest {
    pub service_code: String,
    pub amount: i64,
}

/// One raw history record as the backend serializes it. Mapped into
/// the strongly typed `models::TransactionRecord` at the client boundary.
#[derive(Debug, Deserialize)]
pub struct RawTransactionRecord {
    pub invoice_number: String,
    pub transaction_type: String,
    pub total_amount: i64,
    pub created_on: String,
}

/// `data` returned by GET /transaction/history
#[derive(Debug, Deserialize)]
pub struct HistoryData {
    pub records: Vec<RawTransactionRecord>,
}

/// Raw receipt returned by POST /transaction
#[derive(Debug, Deserialize)]
pub struct RawPaymentReceipt {
    pub invoice_number: String,
    pub service_code: String,
    pub service_name: String,
    pub transaction_type: String,
    pub total_amount: i64,
    pub created_on: String,
}

/// Error type for all SIMS PPOB API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport-level failure, no usable response
    #[error("Network error: {0}")]
    Request(String),
    /// Response received but the envelope carries a non-zero status
    #[error("API error ({status}): {message}")]
    Api { status: i32, message: String },
    /// Non-2xx HTTP response without a parsable envelope
    #[error("HTTP error ({code}): {body}")]
    Http { code: u16, body: String },
    /// 401 from the backend, or no token stored locally
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Payload did not match the expected shape
    #[error("Malformed response: {0}")]
    Deserialize(String),
    /// Input rejected before any request was made
    #[error("{0}")]
    InvalidInput(String),
}
