use serde::Deserialize;

/// One payable service from the GET /services catalogue
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInfo {
    pub service_code: String,
    pub service_name: String,
    #[serde(default)]
    pub service_icon: Option<String>,
    pub service_tariff: i64,
}
