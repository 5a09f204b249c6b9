use std::path::Path;

use crate::api::ppob::ApiError;
use crate::services::profile_service;
use crate::AppContext;

pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), ApiError> {
    match args {
        [] => {
            let profile = profile_service::get_profile(&ctx.client).await?;
            println!("Nama  : {}", profile.full_name());
            println!("Email : {}", profile.email);
            if let Some(image) = &profile.profile_image {
                println!("Foto  : {}", image);
            }
        }
        ["edit", email, first_name, last_name] => {
            let profile =
                profile_service::update_profile(&ctx.client, email, first_name, last_name).await?;
            println!("Profil berhasil diperbarui: {} <{}>", profile.full_name(), profile.email);
        }
        ["image", path] => {
            let profile = profile_service::upload_image(&ctx.client, Path::new(path)).await?;
            println!("Foto profil berhasil diupdate untuk {}", profile.full_name());
        }
        _ => {
            println!("Pemakaian: profile | profile edit <email> <nama_depan> <nama_belakang> | profile image <path>");
        }
    }
    Ok(())
}
