use crate::api::ppob::ApiError;
use crate::services::auth_service::{self, RegistrationForm};
use crate::AppContext;

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), ApiError> {
    let [email, first_name, last_name, password, confirm_password] = args else {
        println!("Pemakaian: register <email> <nama_depan> <nama_belakang> <password> <konfirmasi>");
        return Ok(());
    };

    let form = RegistrationForm {
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        password: password.to_string(),
        confirm_password: confirm_password.to_string(),
    };

    let message = auth_service::register(&ctx.client, form).await?;
    println!("{}", message);
    println!("Silakan login dengan akun baru anda.");
    Ok(())
}
