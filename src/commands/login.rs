use crate::api::ppob::ApiError;
use crate::services::auth_service;
use crate::AppContext;

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), ApiError> {
    let [email, password] = args else {
        println!("Pemakaian: login <email> <password>");
        return Ok(());
    };

    auth_service::login(&ctx.client, &ctx.session, email, password).await?;
    // Fresh session, fresh list.
    ctx.history.reset().await;
    println!("Login berhasil. Selamat datang!");
    Ok(())
}
