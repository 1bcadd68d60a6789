pub mod error;
pub mod types;

pub use error::{NominatimError, Result};
pub use types::{Coordinates, SearchResult};

/// Public OpenStreetMap Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Thin client for the Nominatim `/search` endpoint. Does no throttling or
/// caching itself; the usage policy (one request per second against the
/// public instance, identifying User-Agent) is enforced by the caller's
/// rate gate, while the User-Agent is pinned here per request.
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl NominatimClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Look up a free-form place name. Returns the best match or `None`
    /// when Nominatim finds nothing; any transport or decode problem is an
    /// error, not a miss.
    pub async fn search(&self, query: &str) -> Result<Option<SearchResult>> {
        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NominatimError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let mut results: Vec<SearchResult> = resp.json().await?;
        tracing::debug!(query, matches = results.len(), "Nominatim search complete");

        if results.is_empty() {
            Ok(None)
        } else {
            Ok(Some(results.remove(0)))
        }
    }
}
