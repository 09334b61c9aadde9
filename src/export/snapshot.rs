// Raw market rows saved as pretty JSON so a run can be replayed via JsonFileSource.

use std::path::Path;

use crate::export::types::ExportResult;
use crate::market_data::adapters::CoinMarket;

pub fn save_markets(path: &Path, coins: &[CoinMarket]) -> ExportResult<()> {
    let json = serde_json::to_string_pretty(coins)?;
    std::fs::write(path, json)?;
    Ok(())
}
