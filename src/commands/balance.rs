use crate::api::ppob::ApiError;
use crate::services::balance_service;
use crate::AppContext;

pub async fn execute(ctx: &AppContext) -> Result<(), ApiError> {
    let result = balance_service::get_balance(&ctx.client).await?;
    println!("Saldo anda: {}", result.formatted);
    Ok(())
}
