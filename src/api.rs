//! WeatherAPI.com current-conditions client

use crate::error::QueryError;
use crate::mapper;
use crate::state::WeatherSnapshot;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

/// Thin client over the `v1/current.json` endpoint.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request URL for `city`, percent-encoded, air quality disabled
    pub fn current_url(&self, city: &str) -> String {
        format!(
            "{}/v1/current.json?key={}&q={}&aqi=no",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(city)
        )
    }

    /// Fetch current conditions for `city`. Issues exactly one GET.
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, QueryError> {
        tracing::debug!(city, base_url = %self.base_url, "requesting current conditions");

        let response = self
            .http
            .get(self.current_url(city))
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key
                let e = e.without_url();
                tracing::warn!(city, error = %e, "weather request failed");
                QueryError::transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::info!(city, %status, "provider rejected query");
            return Err(QueryError::NotFound);
        }

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::warn!(city, error = %e, "failed to read weather response body");
            QueryError::transport(e.to_string())
        })?;

        parse_snapshot(&body)
    }
}

/// Parse and validate a success body.
///
/// A body missing fields, or carrying a local time that cannot be displayed,
/// is rejected here instead of reaching the renderer.
pub fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, QueryError> {
    let snapshot: WeatherSnapshot = serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "malformed weather response");
        QueryError::transport(format!("Unexpected weather response: {e}"))
    })?;

    mapper::parse_local_time(&snapshot.location.localtime).map_err(|e| {
        tracing::warn!(error = %e, "weather response has unusable local time");
        QueryError::transport(format!("Unexpected weather response: {e}"))
    })?;

    Ok(snapshot)
}
