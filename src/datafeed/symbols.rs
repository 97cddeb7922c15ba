//! Static symbol metadata the charting widget asks for during bootstrap.

use crate::shared::SUPPORTED_RESOLUTIONS;
use serde::Serialize;

pub const EXCHANGE: &str = "MEMEPUMP";
pub const SYMBOL_TYPE: &str = "crypto";

/// Answer to the widget's `onReady` probe.
#[derive(Debug, Clone, Serialize)]
pub struct DatafeedConfig {
    pub supported_resolutions: Vec<&'static str>,
    pub exchanges: Vec<Exchange>,
    pub symbols_types: Vec<SymbolTypeDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub value: String,
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolTypeDescriptor {
    pub name: String,
    pub value: String,
}

impl Default for DatafeedConfig {
    fn default() -> Self {
        Self {
            supported_resolutions: SUPPORTED_RESOLUTIONS.to_vec(),
            exchanges: vec![Exchange {
                value: EXCHANGE.to_string(),
                name: EXCHANGE.to_string(),
                desc: EXCHANGE.to_string(),
            }],
            symbols_types: vec![SymbolTypeDescriptor {
                name: SYMBOL_TYPE.to_string(),
                value: SYMBOL_TYPE.to_string(),
            }],
        }
    }
}

/// Resolved symbol metadata. Every token chart trades 24x7 in UTC against the
/// same synthetic exchange, so this is synthesized rather than fetched.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub symbol_type: String,
    pub session: String,
    pub timezone: String,
    pub exchange: String,
    pub minmov: u32,
    pub pricescale: u64,
    pub has_intraday: bool,
    pub has_daily: bool,
    pub has_weekly_and_monthly: bool,
    pub has_seconds: bool,
    pub has_intraday_seconds: bool,
    pub supported_resolutions: Vec<&'static str>,
    pub volume_precision: u32,
    pub data_status: String,
}

impl SymbolInfo {
    pub fn for_symbol(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: name.to_string(),
            symbol_type: SYMBOL_TYPE.to_string(),
            session: "24x7".to_string(),
            timezone: "UTC".to_string(),
            exchange: EXCHANGE.to_string(),
            minmov: 1,
            pricescale: 100_000_000,
            has_intraday: true,
            has_daily: true,
            has_weekly_and_monthly: true,
            has_seconds: true,
            has_intraday_seconds: true,
            supported_resolutions: SUPPORTED_RESOLUTIONS.to_vec(),
            volume_precision: 8,
            data_status: "streaming".to_string(),
        }
    }
}

/// One row of a symbol search response.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolSearchResult {
    pub symbol: String,
    pub full_name: String,
    pub description: String,
    pub exchange: String,
    #[serde(rename = "type")]
    pub symbol_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_lists_all_resolutions() {
        let config = DatafeedConfig::default();
        assert_eq!(config.supported_resolutions.len(), 10);
        assert!(config.supported_resolutions.contains(&"1MN"));
        assert_eq!(config.exchanges[0].value, "MEMEPUMP");
    }

    #[test]
    fn test_symbol_info_serializes_type_field() {
        let info = SymbolInfo::for_symbol("MEME/SOL");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "crypto");
        assert_eq!(json["pricescale"], 100_000_000u64);
        assert_eq!(json["session"], "24x7");
    }
}
