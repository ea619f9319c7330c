pub mod http_client;

use crate::config::SourceConfig;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;
use url::Url;

use self::http_client::HttpClient;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Anything that can hand back the raw daily CSV as text.
#[async_trait]
pub trait CsvSource: Send + Sync {
    /// Where the data comes from, for logs.
    fn endpoint(&self) -> &str;

    async fn fetch_csv(&self) -> Result<String>;
}

// ── HTTP source ───────────────────────────────────────────────────────────────

pub struct HttpSource {
    client: HttpClient,
    url: Url,
    timeout_secs: u64,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
            url: config.endpoint()?,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl CsvSource for HttpSource {
    fn endpoint(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch_csv(&self) -> Result<String> {
        info!("Fetching {} (timeout {}s)", self.url, self.timeout_secs);
        self.client.get_text(&self.url).await
    }
}
