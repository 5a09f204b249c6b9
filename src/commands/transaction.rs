use crate::api::ppob::ApiError;
use crate::models::TransactionRecord;
use crate::services::balance_service;
use crate::services::history_service::LoadOutcome;
use crate::utils::{format_datetime_wib, format_rupiah, Table};
use crate::AppContext;

/// `history`: reload from scratch, like the transaction screen regaining
/// focus in the mobile app.
pub async fn execute(ctx: &AppContext) -> Result<(), ApiError> {
    ctx.history.reset().await;
    ctx.history.load_next_page().await?;

    // The screen shows the balance above the list; a balance failure must
    // not hide the transactions themselves.
    match balance_service::get_balance(&ctx.client).await {
        Ok(result) => println!("Saldo anda: {}\n", result.formatted),
        Err(e) => tracing::warn!("Failed to fetch balance: {}", e),
    }

    let snapshot = ctx.history.snapshot().await;
    if snapshot.items.is_empty() {
        println!("No transactions found");
        return Ok(());
    }

    print_records(&snapshot.items);
    print_more_hint(snapshot.has_more);
    Ok(())
}

/// `more`: the "Show more" button
pub async fn execute_more(ctx: &AppContext) -> Result<(), ApiError> {
    match ctx.history.request_more().await? {
        LoadOutcome::Loaded(count) => {
            let snapshot = ctx.history.snapshot().await;
            let offset = snapshot.items.len() - count;
            if count == 0 {
                println!("Tidak ada transaksi lagi.");
            } else {
                print_records(&snapshot.items[offset..]);
            }
            print_more_hint(snapshot.has_more);
        }
        LoadOutcome::Skipped => {
            println!("Tidak ada transaksi lagi untuk dimuat.");
        }
        LoadOutcome::Stale => {}
    }
    Ok(())
}

fn print_records(records: &[TransactionRecord]) {
    let mut table = Table::new(vec!["Jumlah", "Transaksi", "Waktu", "Invoice"]);
    for record in records {
        table.add_row(vec![
            format!(
                "{} {}",
                record.transaction_type.sign(),
                format_rupiah(record.total_amount as i64)
            ),
            record.transaction_type.label().to_string(),
            format_datetime_wib(record.created_on),
            record.invoice_number.clone(),
        ]);
    }
    println!("{}", table.render());
}

fn print_more_hint(has_more: bool) {
    if has_more {
        println!("Ketik `more` untuk menampilkan transaksi berikutnya.");
    }
}
