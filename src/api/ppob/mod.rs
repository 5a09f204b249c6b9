pub mod client;
pub mod models;

pub use client::PpobClient;
pub use models::ApiError;
