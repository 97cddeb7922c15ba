//! Wire types for the chart endpoint.

use super::Bar;
use serde::Deserialize;

/// Payload of `GET /api/v1/on-chain/chart/{address}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub oclhv: Vec<BarResponse>,
}

/// A single candle as the backend sends it: `time` in epoch seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct BarResponse {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<BarResponse> for Bar {
    fn from(r: BarResponse) -> Self {
        Self {
            time: r.time * 1000,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_time_normalized_to_millis() {
        let body = r#"{"oclhv": [
            {"time": 1700000000, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 10.0}
        ]}"#;
        let resp: ChartResponse = serde_json::from_str(body).unwrap();
        let bar: Bar = resp.oclhv[0].clone().into();
        assert_eq!(bar.time, 1_700_000_000_000);
        assert_eq!(bar.close, 1.5);
    }
}
