// src/api/client.rs
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::error::{status_message, ApiError};
use super::types::{AnalysisRequest, AnalysisResult, ValidationReport, ValidationRequest};

pub const VALIDATE_PATH: &str = "/validador/validar";
pub const ANALYZE_PATH: &str = "/analisis/analizar";
pub const ANALYZE_WITH_REPORT_PATH: &str = "/analisis/analizar-con-reporte";

/// Thin wrapper over the analysis service. One round trip per call: no
/// retries, no client-side timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn validate(&self, request: &ValidationRequest) -> Result<ValidationReport, ApiError> {
        self.post_json(VALIDATE_PATH, request).await
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        self.post_json(ANALYZE_PATH, request).await
    }

    /// Same as [`ApiClient::analyze`], plus the markdown report and diagrams.
    pub async fn analyze_with_report(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, ApiError> {
        self.post_json(ANALYZE_WITH_REPORT_PATH, request).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: status_message(status, &body),
            });
        }

        response.json::<R>().await.map_err(ApiError::Decode)
    }
}
