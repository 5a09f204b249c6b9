//! Domain models shared across services and commands

pub mod banner;
pub mod profile;
pub mod service;
pub mod transaction;

pub use banner::BannerInfo;
pub use profile::Profile;
pub use service::ServiceInfo;
pub use transaction::{PaymentReceipt, TransactionRecord, TransactionType};
