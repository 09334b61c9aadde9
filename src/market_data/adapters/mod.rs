// Shared trait for market data sources

#[async_trait::async_trait]
pub trait MarketSource {
    // Whole batch, in the order the source ranks it (market cap desc for CoinGecko).
    async fn fetch_markets(&self) -> anyhow::Result<Vec<coingecko_types::CoinMarket>>;
}

pub mod coingecko;
pub mod coingecko_types;
pub mod json_file;

pub use coingecko::CoinGeckoSource;
pub use coingecko_types::{to_records, CoinMarket, RecordError};
pub use json_file::JsonFileSource;
