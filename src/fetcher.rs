use log::{debug, info};
use reqwest::Client;

use crate::error::Result;

#[derive(Clone)]
pub struct BlockFetcher {
    client: Client,
    api_url: String,
}

impl BlockFetcher {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }

    pub fn block_url(&self, block_hash: &str) -> String {
        format!("{}/rawblock/{}", self.api_url.trim_end_matches('/'), block_hash)
    }

    // One GET, no retry. Non-2xx responses are errors.
    pub async fn fetch_raw_block(&self, block_hash: &str) -> Result<String> {
        let url = self.block_url(block_hash);
        info!("Fetching block {}", url);

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        debug!("Received {} bytes for block {}", body.len(), block_hash);
        Ok(body)
    }
}
