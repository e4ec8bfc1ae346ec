use reqwest::Client;
use serde_json::Value;

/// Client for the external motivational-quote service. Best-effort upstream:
/// default reqwest timeouts, no retry, no caching.
#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch a single affirmation and relay its JSON body verbatim.
    pub async fn fetch_affirmation(&self) -> anyhow::Result<Value> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
