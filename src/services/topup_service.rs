use crate::api::ppob::{ApiError, PpobClient};

/// Backend-imposed top-up bounds, in whole rupiah
pub const MIN_TOPUP: i64 = 10_000;
pub const MAX_TOPUP: i64 = 1_000_000;

/// Quick-pick amounts mirrored from the top-up screen
pub const NOMINAL_OPTIONS: [i64; 6] = [10_000, 20_000, 50_000, 100_000, 250_000, 500_000];

fn validate_amount(amount: i64) -> Result<(), ApiError> {
    if !(MIN_TOPUP..=MAX_TOPUP).contains(&amount) {
        return Err(ApiError::InvalidInput(format!(
            "Nominal top up harus antara Rp 10.000 - Rp 1.000.000, bukan Rp {}",
            amount
        )));
    }
    Ok(())
}

/// Credit the balance. Returns the balance after the top-up.
pub async fn top_up(client: &PpobClient, amount: i64) -> Result<i64, ApiError> {
    validate_amount(amount)?;
    client.top_up(amount).await
}
