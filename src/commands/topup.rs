use crate::api::ppob::ApiError;
use crate::services::topup_service;
use crate::utils::format_rupiah;
use crate::AppContext;

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), ApiError> {
    let [raw_amount] = args else {
        println!("Pemakaian: topup <nominal>");
        let options: Vec<String> = topup_service::NOMINAL_OPTIONS
            .iter()
            .map(|n| format_rupiah(*n))
            .collect();
        println!("Pilihan nominal: {}", options.join(", "));
        return Ok(());
    };

    // Accept "50000" as well as the formatted "50.000".
    let amount: i64 = raw_amount
        .replace('.', "")
        .parse()
        .map_err(|_| ApiError::InvalidInput(format!("{:?} bukan nominal yang valid", raw_amount)))?;

    let new_balance = topup_service::top_up(&ctx.client, amount).await?;
    println!("Top up berhasil. Saldo anda sekarang: {}", format_rupiah(new_balance));
    Ok(())
}
