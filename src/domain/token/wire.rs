//! Wire types for token listings.

use super::TokenSummary;
use crate::shared::TokenAddress;
use serde::Deserialize;

/// A top-coins item as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSummaryResponse {
    pub address: TokenAddress,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "priceUsd", default)]
    pub price_usd: f64,
    #[serde(rename = "marketCap", default)]
    pub market_cap: f64,
    #[serde(rename = "volume24h", default)]
    pub volume_24h: f64,
    #[serde(rename = "change24h", default)]
    pub change_24h: f64,
}

impl From<TokenSummaryResponse> for TokenSummary {
    fn from(r: TokenSummaryResponse) -> Self {
        Self {
            address: r.address,
            symbol: r.symbol,
            name: r.name,
            price_usd: r.price_usd,
            market_cap: r.market_cap,
            volume_24h: r.volume_24h,
            change_24h: r.change_24h,
        }
    }
}
