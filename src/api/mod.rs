pub mod ppob;

pub use ppob::{ApiError, PpobClient};
