use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod models;
mod services;
mod session;
mod utils;

use api::ppob::PpobClient;
use services::history_service::TransactionHistory;
use session::SessionStore;

/// Shared state handed to every command handler
pub struct AppContext {
    pub client: Arc<PpobClient>,
    pub session: Arc<SessionStore>,
    pub history: TransactionHistory<PpobClient>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sims_ppob=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    info!("Starting SIMS PPOB terminal client");

    let session = Arc::new(SessionStore::from_env());
    let client = match std::env::var("PPOB_BASE_URL") {
        Ok(url) => Arc::new(PpobClient::with_base_url(session.clone(), url)),
        Err(_) => Arc::new(PpobClient::new(session.clone())),
    };
    let history = TransactionHistory::new(client.clone());

    let ctx = AppContext {
        client,
        session: session.clone(),
        history,
    };

    println!("SIMS PPOB - Payment Point Online Bank");
    if session.is_authenticated() {
        println!("Sesi sebelumnya dipulihkan. Ketik `help` untuk daftar perintah.");
    } else {
        println!("Silakan `login <email> <password>`, atau ketik `help`.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("ppob> ");
        let _ = std::io::stdout().flush();

        match lines.next_line().await {
            Ok(Some(line)) => {
                if !commands::handle_command(&ctx, &line).await {
                    break;
                }
            }
            // EOF: piped input ran out
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    println!("Sampai jumpa!");
}
