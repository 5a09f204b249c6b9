use serde::Deserialize;

/// Promotional banner from GET /banner
#[derive(Debug, Clone, Deserialize)]
pub struct BannerInfo {
    pub banner_name: String,
    pub banner_image: String,
    #[serde(default)]
    pub description: Option<String>,
}
