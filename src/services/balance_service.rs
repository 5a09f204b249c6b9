use crate::api::ppob::{ApiError, PpobClient};
use crate::utils::format_rupiah;

pub struct BalanceResult {
    pub balance: i64,
    pub formatted: String,
}

pub async fn get_balance(client: &PpobClient) -> Result<BalanceResult, ApiError> {
    let balance = client.balance().await?;
    Ok(BalanceResult {
        balance,
        formatted: format_rupiah(balance),
    })
}
