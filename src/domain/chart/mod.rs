//! Chart domain — OHLCV bars and market-cap display scaling.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};

/// A single OHLCV candle. `time` is epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Which series the chart endpoint returns: raw token price, or the same
/// candles expressed as market capitalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceMode {
    #[default]
    Price,
    MarketCap,
}

impl PriceMode {
    /// The `market_cap=` query parameter value.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::MarketCap => "marketcap",
        }
    }
}

/// Rescale a live price bar into market-cap terms.
///
/// The implied circulating supply is `market_cap / close`; open/high/low scale
/// by it and close becomes the market cap itself. Volume is left in token
/// units. A zero close would divide by zero, so the bar passes through
/// unscaled.
pub fn rescale_to_market_cap(bar: &Bar, market_cap: f64) -> Bar {
    if bar.close == 0.0 {
        return *bar;
    }

    let total_supply = market_cap / bar.close;
    Bar {
        time: bar.time,
        open: bar.open * total_supply,
        high: bar.high * total_supply,
        low: bar.low * total_supply,
        close: market_cap,
        volume: bar.volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_to_market_cap() {
        let bar = Bar {
            time: 1_700_000_000_000,
            open: 95.0,
            high: 110.0,
            low: 90.0,
            close: 100.0,
            volume: 42.0,
        };
        let scaled = rescale_to_market_cap(&bar, 500.0);

        // total_supply = 500 / 100 = 5
        assert_eq!(scaled.open, 475.0);
        assert_eq!(scaled.high, 550.0);
        assert_eq!(scaled.low, 450.0);
        assert_eq!(scaled.close, 500.0);
        assert_eq!(scaled.volume, 42.0);
        assert_eq!(scaled.time, bar.time);
    }

    #[test]
    fn test_rescale_zero_close_passes_through() {
        let bar = Bar {
            time: 0,
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 0.0,
            volume: 1.0,
        };
        assert_eq!(rescale_to_market_cap(&bar, 500.0), bar);
    }

    #[test]
    fn test_price_mode_params() {
        assert_eq!(PriceMode::Price.as_param(), "price");
        assert_eq!(PriceMode::MarketCap.as_param(), "marketcap");
    }
}
