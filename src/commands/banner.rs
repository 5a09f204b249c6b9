use crate::api::ppob::ApiError;
use crate::AppContext;

pub async fn execute(ctx: &AppContext) -> Result<(), ApiError> {
    let banners = ctx.client.banners().await?;
    if banners.is_empty() {
        println!("Tidak ada banner promo saat ini.");
        return Ok(());
    }

    for banner in &banners {
        println!("• {}", banner.banner_name);
        if let Some(description) = &banner.description {
            println!("  {}", description);
        }
        println!("  {}", banner.banner_image);
    }
    Ok(())
}
