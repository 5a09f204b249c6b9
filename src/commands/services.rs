use crate::api::ppob::ApiError;
use crate::utils::{format_rupiah, Table};
use crate::AppContext;

pub async fn execute(ctx: &AppContext) -> Result<(), ApiError> {
    let services = ctx.client.services().await?;
    if services.is_empty() {
        println!("Tidak ada layanan tersedia.");
        return Ok(());
    }

    let mut table = Table::new(vec!["Kode", "Layanan", "Tarif"]);
    for service in &services {
        table.add_row(vec![
            service.service_code.clone(),
            service.service_name.clone(),
            format_rupiah(service.service_tariff),
        ]);
    }
    println!("{}", table.render());
    println!("Gunakan `pay <kode>` untuk membayar.");
    Ok(())
}
