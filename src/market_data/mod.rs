// Market data module entrypoint
pub mod adapters;    // market sources (CoinGecko, saved JSON)
pub mod normaliser;  // min-max rescaling of batch metrics
