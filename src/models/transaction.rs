//! Transaction history models

use chrono::{DateTime, Utc};

/// Category of a history entry as reported by the backend.
/// Unknown strings are preserved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionType {
    TopUp,
    Payment,
    Other(String),
}

impl TransactionType {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "TOPUP" => TransactionType::TopUp,
            "PAYMENT" => TransactionType::Payment,
            other => TransactionType::Other(other.to_string()),
        }
    }

    /// Sign shown next to the amount: top-ups credit the balance,
    /// everything else draws from it.
    pub fn sign(&self) -> char {
        match self {
            TransactionType::TopUp => '+',
            _ => '-',
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TransactionType::TopUp => "Top Up Saldo",
            TransactionType::Payment => "Pembayaran",
            TransactionType::Other(raw) => raw,
        }
    }
}

/// One settled transaction, keyed by invoice number
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub invoice_number: String,
    pub transaction_type: TransactionType,
    pub total_amount: u64,
    pub created_on: DateTime<Utc>,
}

/// Receipt returned when a bill payment settles
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub invoice_number: String,
    pub service_code: String,
    pub service_name: String,
    pub transaction_type: TransactionType,
    pub total_amount: u64,
    pub created_on: DateTime<Utc>,
}
