use crate::config::SourceConfig;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;
use url::Url;

fn client_builder(config: &SourceConfig) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
}

pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let inner = client_builder(config)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { inner })
    }

    /// Single GET, no retry. Non-2xx and non-UTF-8 bodies are errors.
    pub async fn get_text(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);

        let resp = self
            .inner
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = resp.status();
        let resp = resp
            .error_for_status()
            .with_context(|| format!("HTTP error {}", status))?;

        let body = resp
            .bytes()
            .await
            .context("Failed to read response body")?;

        debug!("{} bytes received", body.len());

        String::from_utf8(body.to_vec()).context("Response body is not valid UTF-8")
    }
}
