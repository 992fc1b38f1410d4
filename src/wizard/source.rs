use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    api::RECOMMENDATIONS_PATH,
    error::{AppError, AppResult},
    models::{MediaType, RecommendationResult, UserSelection},
};

/// Where the wizard gets its recommendations from
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Every result the assembler returned for `selection`, unsampled
    async fn fetch(&self, selection: &UserSelection) -> AppResult<Vec<RecommendationResult>>;
}

/// Body of a recommendation proxy response; either field may be present
#[derive(Debug, Deserialize)]
struct ProxyBody {
    #[serde(default)]
    results: Option<Vec<RecommendationResult>>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    status: Option<u16>,
}

/// Calls the recommendation endpoint over HTTP
#[derive(Clone)]
pub struct ProxyClient {
    http_client: HttpClient,
    base_url: String,
}

impl ProxyClient {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, RECOMMENDATIONS_PATH)
    }

    /// Raw provider detail record for one title, for the drill-down view
    pub async fn fetch_details(&self, id: u64, media_type: MediaType) -> AppResult<serde_json::Value> {
        let id = id.to_string();
        let response = self
            .http_client
            .get(self.endpoint())
            .query(&[("id", id.as_str()), ("type", media_type.as_path())])
            .send()
            .await
            .map_err(|e| AppError::unavailable("Failed to fetch details", e))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::unavailable("Failed to fetch details", e))?;

        if let Some(error) = body.get("error").and_then(|e| e.as_str()) {
            return Err(AppError::Proxy(error.to_string()));
        }

        Ok(body)
    }
}

#[async_trait::async_trait]
impl RecommendationSource for ProxyClient {
    async fn fetch(&self, selection: &UserSelection) -> AppResult<Vec<RecommendationResult>> {
        let response = self
            .http_client
            .get(self.endpoint())
            .query(&selection.proxy_params())
            .send()
            .await
            .map_err(|e| AppError::unavailable("Failed to fetch recommendations", e))?;

        // Error bodies carry their own message, so the status is not checked first
        let body: ProxyBody = response
            .json()
            .await
            .map_err(|e| AppError::unavailable("Failed to fetch recommendations", e))?;

        if let Some(error) = body.error {
            tracing::warn!(error = %error, upstream_status = body.status, "Recommendation proxy error");
            return Err(AppError::Proxy(error));
        }

        Ok(body.results.unwrap_or_default())
    }
}
