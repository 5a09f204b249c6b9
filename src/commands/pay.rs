use crate::api::ppob::ApiError;
use crate::services::payment_service;
use crate::utils::{format_datetime_wib, format_rupiah};
use crate::AppContext;

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), ApiError> {
    let [service_code] = args else {
        println!("Pemakaian: pay <kode_layanan> (lihat `services` untuk daftar kode)");
        return Ok(());
    };

    let receipt = payment_service::pay(&ctx.client, service_code).await?;
    println!("Pembayaran {} berhasil!", receipt.service_name);
    println!("  Invoice : {}", receipt.invoice_number);
    println!("  Total   : {}", format_rupiah(receipt.total_amount as i64));
    println!("  Waktu   : {}", format_datetime_wib(receipt.created_on));
    Ok(())
}
