use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{
    ApiError, BalanceData, Envelope, HistoryData, LoginData, LoginRequest, PaymentRequest,
    ProfileUpdateRequest, RawPaymentReceipt, RawTransactionRecord, RegisterRequest, TopUpRequest,
};
use crate::models::{BannerInfo, PaymentReceipt, Profile, ServiceInfo, TransactionRecord, TransactionType};
use crate::services::history_service::HistoryFetcher;
use crate::session::SessionStore;

/// SIMS PPOB API client. Owns the HTTP connection pool and reads the
/// bearer token from the injected session store on every request.
pub struct PpobClient {
    http_client: HttpClient,
    base_url: String,
    session: Arc<SessionStore>,
}

impl PpobClient {
    const DEFAULT_BASE_URL: &'static str = "https://take-home-test-api.nutech-integrasi.com";
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client against the production backend
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self::with_base_url(session, Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with custom base URL (for testing)
    pub fn with_base_url(session: Arc<SessionStore>, base_url: String) -> Self {
        let http_client = HttpClient::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            http_client,
            base_url,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build request headers; `auth` adds the bearer token from the session
    fn create_headers(&self, auth: bool) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if auth {
            let token = self
                .session
                .token()
                .ok_or_else(|| ApiError::Unauthorized("no session token, please login first".to_string()))?;
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Request(format!("Failed to create auth header: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Parse error response based on HTTP status code. The backend usually
    /// returns its envelope even on 4xx, so try that first for the message.
    async fn handle_error_response(status: reqwest::StatusCode, response: reqwest::Response) -> ApiError {
        let code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        if let Ok(env) = serde_json::from_str::<Envelope<serde_json::Value>>(&body_text) {
            let message = env.message.unwrap_or_else(|| body_text.clone());
            if code == 401 {
                return ApiError::Unauthorized(message);
            }
            return ApiError::Api {
                status: env.status,
                message,
            };
        }

        if code == 401 {
            return ApiError::Unauthorized(body_text);
        }
        if (500..=599).contains(&code) {
            warn!("Server error {}: {}", code, body_text);
        }
        ApiError::Http {
            code,
            body: body_text,
        }
    }

    /// Send a prepared request and decode the response envelope
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| ApiError::Deserialize(format!("Failed to parse response: {}", e)))
    }

    /// Reject non-zero envelope status and unwrap the payload
    fn unwrap_data<T>(env: Envelope<T>) -> Result<T, ApiError> {
        if env.status != 0 {
            return Err(ApiError::Api {
                status: env.status,
                message: env.message.unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        env.data
            .ok_or_else(|| ApiError::Deserialize("response envelope has no data field".to_string()))
    }

    /// POST /registration
    ///
    /// Creates an account. Returns the backend's confirmation message.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let env: Envelope<serde_json::Value> = self
            .dispatch(
                self.http_client
                    .post(self.url("/registration"))
                    .headers(self.create_headers(false)?)
                    .json(request),
            )
            .await?;

        if env.status != 0 {
            return Err(ApiError::Api {
                status: env.status,
                message: env.message.unwrap_or_else(|| "registration failed".to_string()),
            });
        }
        Ok(env
            .message
            .unwrap_or_else(|| "Registrasi berhasil silahkan login".to_string()))
    }

    /// POST /login
    ///
    /// Exchanges credentials for a bearer token. The caller decides where
    /// the token is stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let env: Envelope<LoginData> = self
            .dispatch(
                self.http_client
                    .post(self.url("/login"))
                    .headers(self.create_headers(false)?)
                    .json(&body),
            )
            .await?;
        Ok(Self::unwrap_data(env)?.token)
    }

    /// GET /profile
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        let env: Envelope<Profile> = self
            .dispatch(
                self.http_client
                    .get(self.url("/profile"))
                    .headers(self.create_headers(true)?),
            )
            .await?;
        Self::unwrap_data(env)
    }

    /// PUT /profile/update
    pub async fn update_profile(&self, request: &ProfileUpdateRequest) -> Result<Profile, ApiError> {
        let env: Envelope<Profile> = self
            .dispatch(
                self.http_client
                    .put(self.url("/profile/update"))
                    .headers(self.create_headers(true)?)
                    .json(request),
            )
            .await?;
        Self::unwrap_data(env)
    }

    /// PUT /profile/image
    ///
    /// Uploads a new profile photo as multipart form data. Only jpeg and
    /// png are accepted by the backend.
    pub async fn upload_profile_image(&self, path: &Path) -> Result<Profile, ApiError> {
        let mime = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            _ => {
                return Err(ApiError::InvalidInput(
                    "Profile image must be a .jpeg or .png file".to_string(),
                ))
            }
        };

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo.jpg")
            .to_string();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| ApiError::InvalidInput(format!("Invalid mime type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let env: Envelope<Profile> = self
            .dispatch(
                self.http_client
                    .put(self.url("/profile/image"))
                    .headers(self.create_headers(true)?)
                    .multipart(form),
            )
            .await?;
        Self::unwrap_data(env)
    }

    /// GET /balance
    pub async fn balance(&self) -> Result<i64, ApiError> {
        let env: Envelope<BalanceData> = self
            .dispatch(
                self.http_client
                    .get(self.url("/balance"))
                    .headers(self.create_headers(true)?),
            )
            .await?;
        Ok(Self::unwrap_data(env)?.balance)
    }

    /// GET /services
    pub async fn services(&self) -> Result<Vec<ServiceInfo>, ApiError> {
        let env: Envelope<Vec<ServiceInfo>> = self
            .dispatch(
                self.http_client
                    .get(self.url("/services"))
                    .headers(self.create_headers(true)?),
            )
            .await?;
        Self::unwrap_data(env)
    }

    /// GET /banner
    pub async fn banners(&self) -> Result<Vec<BannerInfo>, ApiError> {
        let env: Envelope<Vec<BannerInfo>> = self
            .dispatch(
                self.http_client
                    .get(self.url("/banner"))
                    .headers(self.create_headers(true)?),
            )
            .await?;
        Self::unwrap_data(env)
    }

    /// POST /topup
    ///
    /// Returns the balance after the top-up was credited.
    pub async fn top_up(&self, amount: i64) -> Result<i64, ApiError> {
        let body = TopUpRequest {
            top_up_amount: amount,
        };
        let env: Envelope<BalanceData> = self
            .dispatch(
                self.http_client
                    .post(self.url("/topup"))
                    .headers(self.create_headers(true)?)
                    .json(&body),
            )
            .await?;
        Ok(Self::unwrap_data(env)?.balance)
    }

    /// POST /transaction
    pub async fn pay(&self, service_code: &str, amount: i64) -> Result<PaymentReceipt, ApiError> {
        let body = PaymentRequest {
            service_code: service_code.to_string(),
            amount,
        };
        let env: Envelope<RawPaymentReceipt> = self
            .dispatch(
                self.http_client
                    .post(self.url("/transaction"))
                    .headers(self.create_headers(true)?)
                    .json(&body),
            )
            .await?;
        map_receipt(Self::unwrap_data(env)?)
    }

    /// GET /transaction/history?offset={offset}&limit={limit}
    ///
    /// Fetches one page of settled transactions, newest first. Raw records
    /// are validated and mapped into domain types here; a malformed record
    /// fails the whole page.
    pub async fn transaction_history(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<TransactionRecord>, ApiError> {
        debug!("Fetching transaction history offset={} limit={}", offset, limit);
        let url = format!("{}?offset={}&limit={}", self.url("/transaction/history"), offset, limit);
        let env: Envelope<HistoryData> = self
            .dispatch(self.http_client.get(url).headers(self.create_headers(true)?))
            .await?;
        Self::unwrap_data(env)?
            .records
            .into_iter()
            .map(map_record)
            .collect()
    }
}

#[async_trait::async_trait]
impl HistoryFetcher for PpobClient {
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Vec<TransactionRecord>, ApiError> {
        self.transaction_history(offset, limit).await
    }
}

fn parse_created_on(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::Deserialize(format!("bad created_on {:?}: {}", raw, e)))
}

fn check_amount(invoice: &str, amount: i64) -> Result<u64, ApiError> {
    u64::try_from(amount).map_err(|_| {
        ApiError::Deserialize(format!("negative total_amount {} on invoice {}", amount, invoice))
    })
}

fn map_record(raw: RawTransactionRecord) -> Result<TransactionRecord, ApiError> {
    let created_on = parse_created_on(&raw.created_on)?;
    let total_amount = check_amount(&raw.invoice_number, raw.total_amount)?;
    Ok(TransactionRecord {
        transaction_type: TransactionType::from_wire(&raw.transaction_type),
        invoice_number: raw.invoice_number,
        total_amount,
        created_on,
    })
}

fn map_receipt(raw: RawPaymentReceipt) -> Result<PaymentReceipt, ApiError> {
    let created_on = parse_created_on(&raw.created_on)?;
    let total_amount = check_amount(&raw.invoice_number, raw.total_amount)?;
    Ok(PaymentReceipt {
        transaction_type: TransactionType::from_wire(&raw.transaction_type),
        invoice_number: raw.invoice_number,
        service_code: raw.service_code,
        service_name: raw.service_name,
        total_amount,
        created_on,
    })
}
