//! Wire types for the master-trading endpoints.

use super::{
    ConnectionStatus, MasterDetail, MasterTrader, MasterWindows, TraderType, WindowStats,
};
use crate::shared::serde_util::flexible_time_opt;
use crate::shared::WalletAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A master listing row as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterResponse {
    pub id: String,
    #[serde(default)]
    pub solana_address: Option<WalletAddress>,
    #[serde(default)]
    pub eth_address: Option<WalletAddress>,
    #[serde(rename = "type", default)]
    pub trader_type: TraderType,
    #[serde(default)]
    pub connection_status: ConnectionStatus,
}

impl From<MasterResponse> for MasterTrader {
    fn from(r: MasterResponse) -> Self {
        Self {
            id: r.id,
            solana_address: r.solana_address,
            eth_address: r.eth_address,
            trader_type: r.trader_type,
            connection_status: r.connection_status,
        }
    }
}

/// Payload of `GET /api/v1/master-trading/masters/{address}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterDetailResponse {
    pub historic: HistoricResponse,
    #[serde(default, with = "flexible_time_opt")]
    pub pnl_since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoricResponse {
    pub summary: SummaryResponse,
}

/// The windowed summary keyed by `"1d"` / `"7d"` / `"30d"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(rename = "1d", default)]
    pub d1: Option<WindowStats>,
    #[serde(rename = "7d", default)]
    pub d7: Option<WindowStats>,
    #[serde(rename = "30d", default)]
    pub d30: Option<WindowStats>,
}

impl MasterDetailResponse {
    /// Attach the address the detail was fetched for (the payload itself does
    /// not repeat it).
    pub fn into_detail(self, address: WalletAddress) -> MasterDetail {
        MasterDetail {
            address,
            windows: MasterWindows {
                d1: self.historic.summary.d1,
                d7: self.historic.summary.d7,
                d30: self.historic.summary.d30,
            },
            pnl_since: self.pnl_since,
        }
    }
}

/// Body of `POST /api/v1/master-trading/member-connect`.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectRequest {
    pub master_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConnectionStatus>,
    pub master_address: WalletAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_response_defaults() {
        let body = r#"{"id": "m1", "solana_address": "sol1"}"#;
        let resp: MasterResponse = serde_json::from_str(body).unwrap();
        let trader: MasterTrader = resp.into();
        assert_eq!(trader.trader_type, TraderType::Normal);
        assert_eq!(trader.connection_status, ConnectionStatus::NotConnected);
        assert_eq!(trader.address().unwrap().as_str(), "sol1");
    }

    #[test]
    fn test_detail_windows_by_key() {
        let body = r#"{
            "historic": {
                "summary": {
                    "7d": {"totalChange": 80.0, "percentageChange": 12.0, "wins": 3, "losses": 1},
                    "30d": {"totalChange": 200.0}
                }
            },
            "pnl_since": "2025-05-01T00:00:00Z"
        }"#;
        let resp: MasterDetailResponse = serde_json::from_str(body).unwrap();
        let detail = resp.into_detail(WalletAddress::from("sol1"));

        assert!(detail.windows.d1.is_none());
        assert_eq!(detail.windows.d7.unwrap().wins, 3);
        assert_eq!(detail.windows.d30.unwrap().total_change, 200.0);
        assert!(detail.pnl_since.is_some());
    }

    #[test]
    fn test_connect_request_skips_absent_status() {
        let req = ConnectRequest {
            master_id: "m1".to_string(),
            status: None,
            master_address: WalletAddress::from("sol1"),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("status").is_none());

        let req = ConnectRequest {
            status: Some(ConnectionStatus::Pause),
            ..req
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["status"], "pause");
    }
}
