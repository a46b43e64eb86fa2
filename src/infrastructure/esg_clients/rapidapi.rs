use super::EsgScoreClient;
use crate::domain::error::{AppError, Result};
use crate::domain::api_config::EsgApiConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub struct RapidApiEsgClient {
    client: reqwest::Client,
}

impl RapidApiEsgClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl EsgScoreClient for RapidApiEsgClient {
    async fn scores(&self, config: &EsgApiConfig, company_name: &str) -> Result<Vec<Value>> {
        let url = format!("{}/scores", config.base_url.trim_end_matches('/'));

        let mut request = self
            .client
            .get(&url)
            .query(&[("companyname", company_name)])
            .header("x-rapidapi-host", &config.host);
        if let Some(api_key) = &config.api_key {
            request = request.header("x-rapidapi-key", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Failed to parse JSON: {}", e)))?;

        match json {
            Value::Array(items) => Ok(items),
            _ => Err(AppError::UpstreamError(
                "Invalid response format: expected an array".to_string(),
            )),
        }
    }
}
