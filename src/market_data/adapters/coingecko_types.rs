// Source: GET {base}/coins/markets (CoinGecko v3). Every field may be missing or null.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::types::ProjectRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    // we ignore the other fields (image, ath, roi, ...)
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("market row has no coin id (name: {name:?})")]
    MissingIdentifier { name: Option<String> },
}

impl TryFrom<CoinMarket> for ProjectRecord {
    type Error = RecordError;

    fn try_from(coin: CoinMarket) -> Result<Self, Self::Error> {
        let id = match coin.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(RecordError::MissingIdentifier { name: coin.name }),
        };
        Ok(ProjectRecord {
            id,
            name: coin.name.unwrap_or_default(),
            symbol: coin.symbol.unwrap_or_default(),
            price: coin.current_price,
            market_cap: coin.market_cap,
            volume: coin.total_volume,
        })
    }
}

/// Convert a fetched batch, failing on the first row without an id.
pub fn to_records(coins: Vec<CoinMarket>) -> Result<Vec<ProjectRecord>, RecordError> {
    coins.into_iter().map(ProjectRecord::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_coingecko_row_with_nulls() {
        let raw = r#"{
            "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
            "image": "https://example/btc.png",
            "current_price": 61234.5, "market_cap": null, "total_volume": 2.1e10
        }"#;
        let coin: CoinMarket = serde_json::from_str(raw).unwrap();
        let record = ProjectRecord::try_from(coin).unwrap();
        assert_eq!(record.id, "bitcoin");
        assert_eq!(record.symbol, "btc");
        assert_eq!(record.price, Some(61234.5));
        assert_eq!(record.market_cap, None);
        assert_eq!(record.market_cap_or_zero(), 0.0);
        assert_eq!(record.volume, Some(2.1e10));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let coin = CoinMarket { name: Some("Ghost".into()), ..Default::default() };
        assert_eq!(
            ProjectRecord::try_from(coin).unwrap_err(),
            RecordError::MissingIdentifier { name: Some("Ghost".into()) }
        );

        let batch = vec![
            CoinMarket { id: Some("a".into()), ..Default::default() },
            CoinMarket { id: Some("".into()), ..Default::default() },
        ];
        assert!(to_records(batch).is_err());
    }
}
