pub mod encryption;
pub mod format;
pub mod table;

pub use format::{format_datetime_wib, format_rupiah};
pub use table::Table;
