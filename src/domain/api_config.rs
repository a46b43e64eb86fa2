use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LLMConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
        }
    }
}

/// Connection details for the ESG scoring service (RapidAPI-hosted).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EsgApiConfig {
    pub base_url: String,
    /// Value sent as `x-rapidapi-host`.
    pub host: String,
    pub api_key: Option<String>,
}

impl Default for EsgApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gaialens-esg-scores.p.rapidapi.com".to_string(),
            host: "gaialens-esg-scores.p.rapidapi.com".to_string(),
            api_key: None,
        }
    }
}
