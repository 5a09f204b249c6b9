use tracing::info;

use crate::api::ppob::{ApiError, PpobClient};
use crate::models::{PaymentReceipt, ServiceInfo};

/// Resolve a service code against the catalogue. Codes are compared
/// case-insensitively so `pln` works as well as `PLN`.
pub fn find_service<'a>(services: &'a [ServiceInfo], code: &str) -> Option<&'a ServiceInfo> {
    services
        .iter()
        .find(|s| s.service_code.eq_ignore_ascii_case(code))
}

/// Pay one bill: look the service up, charge its tariff.
pub async fn pay(client: &PpobClient, service_code: &str) -> Result<PaymentReceipt, ApiError> {
    let services = client.services().await?;
    let service = find_service(&services, service_code).ok_or_else(|| {
        ApiError::InvalidInput(format!("Layanan {:?} tidak ditemukan", service_code))
    })?;

    let receipt = client.pay(&service.service_code, service.service_tariff).await?;
    info!(
        "Paid {} ({}) - invoice {}",
        service.service_name, service.service_code, receipt.invoice_number
    );
    Ok(receipt)
}
