// Replays a saved /coins/markets payload from disk.

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use super::coingecko_types::CoinMarket;
use super::MarketSource;

pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl MarketSource for JsonFileSource {
    async fn fetch_markets(&self) -> anyhow::Result<Vec<CoinMarket>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let coins: Vec<CoinMarket> = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a markets JSON array", self.path.display()))?;
        info!(path = %self.path.display(), coins = coins.len(), "Loaded markets from file");
        Ok(coins)
    }
}
