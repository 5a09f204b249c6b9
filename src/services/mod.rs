pub mod auth_service;
pub mod balance_service;
pub mod history_service;
pub mod payment_service;
pub mod profile_service;
pub mod topup_service;
