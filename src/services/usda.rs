use crate::models::{UpstreamFoodDetail, UpstreamSearchResponse};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Maximum number of upstream body characters kept for diagnostics
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when calling the USDA API
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response was obtained (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response arrived with a non-success status
    #[error("USDA API returned status {}: {body}", .status.as_u16())]
    Status { status: StatusCode, body: String },

    /// The body could not be decoded as JSON at all
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Connection settings for the USDA FoodData Central API
#[derive(Debug, Clone)]
pub struct UsdaOptions {
    pub base_url: String,
    pub api_key: String,
    pub data_types: Vec<String>,
    pub timeout: Duration,
}

/// USDA FoodData Central API client
///
/// Every call makes exactly one attempt, bounded by the client timeout.
/// Retrying is left to the caller.
pub struct UsdaGateway {
    base_url: String,
    api_key: String,
    data_types: Vec<String>,
    client: Client,
}

impl UsdaGateway {
    /// Create a new gateway
    pub fn new(options: UsdaOptions) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(options.timeout).build()?;

        Ok(Self {
            base_url: options.base_url.trim_end_matches('/').to_string(),
            api_key: options.api_key,
            data_types: options.data_types,
            client,
        })
    }

    /// Search foods matching `query`
    pub async fn search(
        &self,
        query: &str,
        page_size: u32,
    ) -> Result<UpstreamSearchResponse, GatewayError> {
        let url = format!("{}/foods/search", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("query", query.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        params.extend(self.data_types.iter().map(|t| ("dataType", t.clone())));
        params.push(("api_key", self.api_key.clone()));

        tracing::debug!("Searching USDA foods for {:?} (page size {})", query, page_size);

        let response = self.client.get(&url).query(&params).send().await?;

        self.decode(response).await
    }

    /// Fetch the full nutrient record for one food
    pub async fn fetch_detail(&self, fdc_id: &str) -> Result<UpstreamFoodDetail, GatewayError> {
        let url = format!("{}/food/{}", self.base_url, urlencoding::encode(fdc_id));

        tracing::debug!("Fetching USDA food detail for {}", fdc_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, GatewayError> {
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("USDA API response status: {}", status);
        tracing::trace!("USDA API response body: {}", excerpt(&body, 500));

        if !status.is_success() {
            tracing::warn!("USDA API error: status {}, body: {}", status, excerpt(&body, BODY_EXCERPT_CHARS));
            return Err(GatewayError::Status {
                status,
                body: excerpt(&body, BODY_EXCERPT_CHARS),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse USDA response: {}", e)))
    }
}

/// First `max_chars` characters of `body`
fn excerpt(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
