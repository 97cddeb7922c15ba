//! Master-trading domain — copyable traders, their PnL windows, and the
//! leaderboard container behind the master-trade table.

pub mod client;
pub mod state;
pub mod wire;

use crate::shared::WalletAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use state::{Leaderboard, LeaderboardRow, StatusCounts, StatusFilter};

/// Connection state between the member and a master trader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionStatus {
    #[default]
    #[serde(rename = "Not Connected")]
    NotConnected,
    #[serde(rename = "connect")]
    Connect,
    #[serde(rename = "disconnect")]
    Disconnect,
    #[serde(rename = "pause")]
    Pause,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "block")]
    Block,
}

impl ConnectionStatus {
    /// The wire string, also used for display chips.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotConnected => "Not Connected",
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::Pause => "pause",
            Self::Pending => "pending",
            Self::Block => "block",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Master tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraderType {
    #[serde(rename = "VIP")]
    Vip,
    #[default]
    #[serde(rename = "NORMAL")]
    Normal,
}

/// PnL aggregates over one window (1d/7d/30d).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    #[serde(rename = "totalPnL", default)]
    pub total_pnl: f64,
    #[serde(rename = "totalChange", default)]
    pub total_change: f64,
    #[serde(rename = "percentageChange", default)]
    pub percentage_change: f64,
    #[serde(rename = "winPercentage", default)]
    pub win_percentage: f64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

/// A master trader from the listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterTrader {
    pub id: String,
    pub solana_address: Option<WalletAddress>,
    pub eth_address: Option<WalletAddress>,
    pub trader_type: TraderType,
    pub connection_status: ConnectionStatus,
}

impl MasterTrader {
    /// The display address: Solana when present, ETH otherwise.
    pub fn address(&self) -> Option<&WalletAddress> {
        self.solana_address.as_ref().or(self.eth_address.as_ref())
    }
}

/// The three summary windows of a master detail payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterWindows {
    pub d1: Option<WindowStats>,
    pub d7: Option<WindowStats>,
    pub d30: Option<WindowStats>,
}

/// Per-address detail: PnL windows plus the start of the PnL record.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterDetail {
    pub address: WalletAddress,
    pub windows: MasterWindows,
    pub pnl_since: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_status_wire_strings() {
        let s: ConnectionStatus = serde_json::from_str("\"Not Connected\"").unwrap();
        assert_eq!(s, ConnectionStatus::NotConnected);
        let s: ConnectionStatus = serde_json::from_str("\"pause\"").unwrap();
        assert_eq!(s, ConnectionStatus::Pause);
        assert_eq!(
            serde_json::to_string(&ConnectionStatus::Connect).unwrap(),
            "\"connect\""
        );
    }

    #[test]
    fn test_window_stats_wire_casing() {
        let body = r#"{
            "totalPnL": 120.5,
            "totalChange": 80.0,
            "percentageChange": 12.344,
            "winPercentage": 66.7,
            "wins": 10,
            "losses": 5
        }"#;
        let stats: WindowStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.total_pnl, 120.5);
        assert_eq!(stats.percentage_change, 12.344);
        assert_eq!(stats.wins, 10);
    }

    #[test]
    fn test_address_prefers_solana() {
        let trader = MasterTrader {
            id: "m1".to_string(),
            solana_address: Some(WalletAddress::from("sol")),
            eth_address: Some(WalletAddress::from("eth")),
            trader_type: TraderType::Normal,
            connection_status: ConnectionStatus::NotConnected,
        };
        assert_eq!(trader.address().unwrap().as_str(), "sol");

        let eth_only = MasterTrader {
            solana_address: None,
            ..trader
        };
        assert_eq!(eth_only.address().unwrap().as_str(), "eth");
    }
}
