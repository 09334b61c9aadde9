// CoinGecko /coins/markets fetcher: paginated by market cap, one request per page.

use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info, instrument, warn};

use super::coingecko_types::CoinMarket;
use super::MarketSource;
use crate::config::FetchSettings;

pub struct CoinGeckoSource {
    pub markets_url: String, // "{base}/coins/markets"
    pub vs_currency: String, // e.g. "usd"
    pub per_page: u32,
    pub max_pages: u32,
    pub page_delay: Duration,
    client: reqwest::Client,
}

impl CoinGeckoSource {
    pub fn new(settings: &FetchSettings) -> Self {
        Self {
            markets_url: format!("{}/coins/markets", settings.base_url.trim_end_matches('/')),
            vs_currency: settings.vs_currency.clone(),
            per_page: settings.per_page,
            max_pages: settings.max_pages,
            page_delay: Duration::from_millis(settings.page_delay_ms),
            client: reqwest::Client::new(),
        }
    }

    fn page_query(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.vs_currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", page.to_string()),
            ("sparkline", "false".to_string()),
        ]
    }

    #[instrument(skip(self))]
    async fn fetch_page(&self, page: u32) -> anyhow::Result<Vec<CoinMarket>> {
        let res = self
            .client
            .get(&self.markets_url)
            .query(&self.page_query(page))
            .send()
            .await
            .with_context(|| format!("request for markets page {page} failed"))?
            .error_for_status()
            .with_context(|| format!("markets page {page} returned an error status"))?;

        let coins: Vec<CoinMarket> = res
            .json()
            .await
            .with_context(|| format!("markets page {page} is not valid JSON"))?;
        debug!(page, rows = coins.len(), "Fetched markets page");
        Ok(coins)
    }
}

#[async_trait::async_trait]
impl MarketSource for CoinGeckoSource {
    async fn fetch_markets(&self) -> anyhow::Result<Vec<CoinMarket>> {
        let mut coins = Vec::new();
        for page in 1..=self.max_pages {
            info!(page, max_pages = self.max_pages, "Fetching markets page");
            let batch = self.fetch_page(page).await?;
            let rows = batch.len();
            coins.extend(batch);
            metrics::counter!("cryptograph_fetch_pages_total").increment(1);

            if rows < self.per_page as usize {
                if page < self.max_pages {
                    warn!(page, rows, "Short page, stopping pagination early");
                }
                break;
            }
            if page < self.max_pages {
                tokio::time::sleep(self.page_delay).await;
            }
        }
        metrics::counter!("cryptograph_fetch_coins_total").increment(coins.len() as u64);
        info!(coins = coins.len(), "Fetched markets");
        Ok(coins)
    }
}
