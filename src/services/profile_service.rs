use std::path::Path;

use crate::api::ppob::models::ProfileUpdateRequest;
use crate::api::ppob::{ApiError, PpobClient};
use crate::models::Profile;

pub async fn get_profile(client: &PpobClient) -> Result<Profile, ApiError> {
    client.profile().await
}

/// Update name and email. All three fields are required by the backend.
pub async fn update_profile(
    client: &PpobClient,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Profile, ApiError> {
    if email.is_empty() || first_name.is_empty() || last_name.is_empty() {
        return Err(ApiError::InvalidInput(
            "Email, nama depan dan nama belakang harus diisi".to_string(),
        ));
    }

    let request = ProfileUpdateRequest {
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    };
    client.update_profile(&request).await
}

/// Upload a new profile photo from a local file. The backend rejects
/// files over 100KB, so fail early on oversized images.
pub async fn upload_image(client: &PpobClient, path: &Path) -> Result<Profile, ApiError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;
    if metadata.len() > 100 * 1024 {
        return Err(ApiError::InvalidInput(
            "Ukuran foto maksimal 100KB".to_string(),
        ));
    }
    client.upload_profile_image(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use std::sync::Arc;

    fn offline_client() -> PpobClient {
        PpobClient::with_base_url(
            Arc::new(SessionStore::in_memory()),
            "http://127.0.0.1:0".to_string(),
        )
    }

    #[tokio::test]
    async fn test_update_rejects_empty_fields() {
        let err = update_profile(&offline_client(), "budi@example.com", "", "Santoso")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_upload_rejects_missing_file() {
        let err = upload_image(&offline_client(), Path::new("/no/such/photo.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
