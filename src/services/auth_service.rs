use tracing::info;

use crate::api::ppob::models::RegisterRequest;
use crate::api::ppob::{ApiError, PpobClient};
use crate::session::SessionStore;

/// Fields collected by the registration form
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm_password: String,
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    // The backend does the real validation; just catch obvious typos early.
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(ApiError::InvalidInput(format!("{:?} is not a valid email", email)));
    }
    Ok(())
}

/// Log in and store the bearer token in the session
pub async fn login(
    client: &PpobClient,
    session: &SessionStore,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::InvalidInput(
            "Email dan password harus diisi".to_string(),
        ));
    }
    validate_email(email)?;

    let token = client.login(email, password).await?;
    session.set_token(token);
    info!("Logged in as {}", email);
    Ok(())
}

/// Drop the current session
pub fn logout(session: &SessionStore) {
    session.clear();
    info!("Session cleared");
}

/// Validate the registration form locally, then create the account.
/// Returns the backend's confirmation message.
pub async fn register(client: &PpobClient, form: RegistrationForm) -> Result<String, ApiError> {
    if form.email.is_empty()
        || form.first_name.is_empty()
        || form.last_name.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(ApiError::InvalidInput(
            "Semua field harus diisi".to_string(),
        ));
    }
    validate_email(&form.email)?;
    if form.password.len() < 8 {
        return Err(ApiError::InvalidInput(
            "Password minimal 8 karakter".to_string(),
        ));
    }
    if form.password != form.confirm_password {
        return Err(ApiError::InvalidInput(
            "Password dan konfirmasi password tidak sama".to_string(),
        ));
    }

    let request = RegisterRequest {
        email: form.email,
        first_name: form.first_name,
        last_name: form.last_name,
        password: form.password,
    };
    client.register(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn form() -> RegistrationForm {
        RegistrationForm {
            email: "budi@example.com".to_string(),
            first_name: "Budi".to_string(),
            last_name: "Santoso".to_string(),
            password: "rahasia-123".to_string(),
            confirm_password: "rahasia-123".to_string(),
        }
    }

    fn offline_client() -> PpobClient {
        // Unroutable base URL; validation must reject the form before any
        // request is attempted.
        PpobClient::with_base_url(
            Arc::new(SessionStore::in_memory()),
            "http://127.0.0.1:0".to_string(),
        )
    }

    #[tokio::test]
    async fn test_register_rejects_password_mismatch() {
        let mut bad = form();
        bad.confirm_password = "something-else".to_string();
        let err = register(&offline_client(), bad).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let mut bad = form();
        bad.password = "short".to_string();
        bad.confirm_password = "short".to_string();
        assert!(matches!(
            register(&offline_client(), bad).await,
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let mut bad = form();
        bad.last_name = String::new();
        assert!(matches!(
            register(&offline_client(), bad).await,
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_login_rejects_empty_credentials() {
        let session = SessionStore::in_memory();
        let err = login(&offline_client(), &session, "", "")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_email() {
        let session = SessionStore::in_memory();
        let err = login(&offline_client(), &session, "not-an-email", "rahasia-123")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
