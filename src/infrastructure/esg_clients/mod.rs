pub mod rapidapi;

use crate::domain::error::Result;
use crate::domain::api_config::EsgApiConfig;
use async_trait::async_trait;
use serde_json::Value;

pub use rapidapi::RapidApiEsgClient;

#[async_trait]
pub trait EsgScoreClient {
    /// Returns every score object the service knows for `company_name`.
    async fn scores(&self, config: &EsgApiConfig, company_name: &str) -> Result<Vec<Value>>;
}
