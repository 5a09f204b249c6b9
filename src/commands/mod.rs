pub mod balance;
pub mod banner;
pub mod help;
pub mod login;
pub mod pay;
pub mod profile;
pub mod register;
pub mod services;
pub mod topup;
pub mod transaction;

use tracing::debug;

use crate::api::ppob::ApiError;
use crate::services::auth_service;
use crate::AppContext;

/// Dispatch one input line to its command handler.
/// Returns false when the user asked to quit.
pub async fn handle_command(ctx: &AppContext, line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return true;
    }

    let command = parts[0];
    let args = &parts[1..];
    debug!("Dispatching command {:?}", command);

    let result = match command {
        "help" | "?" => {
            help::execute();
            Ok(())
        }
        "register" | "reg" => register::execute(ctx, args).await,
        "login" => login::execute(ctx, args).await,
        "logout" => {
            auth_service::logout(&ctx.session);
            ctx.history.reset().await;
            println!("Anda telah logout.");
            Ok(())
        }
        "profile" => profile::execute(ctx, args).await,
        "balance" | "bal" | "saldo" => balance::execute(ctx).await,
        "services" => services::execute(ctx).await,
        "banner" | "banners" => banner::execute(ctx).await,
        "topup" => topup::execute(ctx, args).await,
        "pay" => pay::execute(ctx, args).await,
        "history" | "tr" => transaction::execute(ctx).await,
        "more" => transaction::execute_more(ctx).await,
        "quit" | "exit" => return false,
        _ => {
            println!("Perintah tidak dikenal: {:?}. Ketik `help` untuk daftar perintah.", command);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {}", describe_error(&e));
    }
    true
}

/// Map API errors onto messages the user can act on
fn describe_error(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized(_) => {
            "Sesi tidak valid. Silakan `login` terlebih dahulu.".to_string()
        }
        ApiError::Request(msg) => {
            format!("Gagal terhubung ke server. Cek koneksi internet anda. ({})", msg)
        }
        ApiError::Api { message, .. } => message.clone(),
        ApiError::InvalidInput(msg) => msg.clone(),
        other => other.to_string(),
    }
}
