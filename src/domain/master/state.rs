//! Leaderboard state container — app-owned, SDK-provided join/filter logic.

use super::{ConnectionStatus, MasterDetail, MasterTrader, TraderType};
use crate::shared::fmt::{format_relative_time, round_up_2dp, truncate_string};
use chrono::{DateTime, Utc};

/// Width used when matching a search query against truncated addresses.
const SEARCH_TRUNCATE_LEN: usize = 12;

/// One trader joined with its (possibly missing) detail payload.
#[derive(Debug, Clone)]
pub struct MasterEntry {
    pub trader: MasterTrader,
    pub detail: Option<MasterDetail>,
}

/// The master-trade table's data: listing rows joined with PnL details.
///
/// The app owns instances of this type and rebuilds rows after each refetch.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<MasterEntry>,
}

/// A display row of the leaderboard. PnL fields are ceil-rounded to two
/// decimals; `None` renders as "updating" (the detail fetch has not landed).
#[derive(Debug, Clone)]
pub struct LeaderboardRow {
    pub id: String,
    pub address: String,
    pub pnl_7d: Option<f64>,
    pub pnl_percent_7d: Option<f64>,
    pub pnl_30d: Option<f64>,
    pub pnl_percent_30d: Option<f64>,
    pub win_rate_7d: Option<f64>,
    pub wins_7d: u32,
    pub losses_7d: u32,
    pub last_time: String,
    pub trader_type: TraderType,
    pub status: ConnectionStatus,
}

impl LeaderboardRow {
    pub fn total_txs_7d(&self) -> u32 {
        self.wins_7d + self.losses_7d
    }
}

/// Render an optional rounded stat, falling back to the placeholder the
/// dashboard shows while details are still loading.
pub fn stat_label(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "updating".to_string(),
    }
}

/// Status filter for the leaderboard chips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Status(ConnectionStatus),
}

/// Row tallies per connection status, for the filter chip captions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub not_connected: usize,
    pub connected: usize,
    pub disconnected: usize,
    pub paused: usize,
    pub pending: usize,
}

impl Leaderboard {
    /// Join listing rows with detail payloads by address.
    ///
    /// Traders without any address are dropped; traders whose detail has not
    /// arrived keep a `None` detail and render as "updating". The trader's own
    /// connection status always wins over anything in the detail payload.
    pub fn combine(traders: Vec<MasterTrader>, details: Vec<MasterDetail>) -> Self {
        let entries = traders
            .into_iter()
            .filter(|t| t.address().is_some())
            .map(|trader| {
                let address = trader.address().cloned();
                let detail = details
                    .iter()
                    .find(|d| Some(&d.address) == address.as_ref())
                    .cloned();
                MasterEntry { trader, detail }
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[MasterEntry] {
        &self.entries
    }

    /// Build display rows, rendering activity times relative to now.
    pub fn rows(&self) -> Vec<LeaderboardRow> {
        self.rows_at(Utc::now())
    }

    pub fn rows_at(&self, now: DateTime<Utc>) -> Vec<LeaderboardRow> {
        self.entries
            .iter()
            .map(|entry| {
                let trader = &entry.trader;
                let detail = entry.detail.as_ref();
                let d7 = detail.and_then(|d| d.windows.d7);
                let d30 = detail.and_then(|d| d.windows.d30);

                let last_time = detail
                    .and_then(|d| d.pnl_since)
                    .map(|ts| format_relative_time(ts, now))
                    .unwrap_or_else(|| "updating".to_string());

                LeaderboardRow {
                    id: trader.id.clone(),
                    address: trader
                        .address()
                        .map(|a| a.as_str().to_string())
                        .unwrap_or_default(),
                    pnl_7d: d7.map(|w| round_up_2dp(w.total_change)),
                    pnl_percent_7d: d7.map(|w| round_up_2dp(w.percentage_change)),
                    pnl_30d: d30.map(|w| round_up_2dp(w.total_change)),
                    pnl_percent_30d: d30.map(|w| round_up_2dp(w.percentage_change)),
                    win_rate_7d: d7.map(|w| round_up_2dp(w.win_percentage)),
                    wins_7d: d7.map(|w| w.wins).unwrap_or(0),
                    losses_7d: d7.map(|w| w.losses).unwrap_or(0),
                    last_time,
                    trader_type: trader.trader_type,
                    status: trader.connection_status,
                }
            })
            .collect()
    }
}

/// Tally rows per status for the filter chips.
pub fn count_statuses(rows: &[LeaderboardRow]) -> StatusCounts {
    let of = |status: ConnectionStatus| rows.iter().filter(|r| r.status == status).count();
    StatusCounts {
        all: rows.len(),
        not_connected: of(ConnectionStatus::NotConnected),
        connected: of(ConnectionStatus::Connect),
        disconnected: of(ConnectionStatus::Disconnect),
        paused: of(ConnectionStatus::Pause),
        pending: of(ConnectionStatus::Pending),
    }
}

/// Apply the status filter and the address search box.
///
/// The search is case-insensitive and matches either the full address or its
/// truncated table form, so pasting a truncated address from the UI works.
pub fn filter_rows(
    rows: &[LeaderboardRow],
    filter: StatusFilter,
    search: &str,
) -> Vec<LeaderboardRow> {
    let query = search.trim().to_lowercase();

    rows.iter()
        .filter(|row| match filter {
            StatusFilter::All => true,
            StatusFilter::Status(s) => row.status == s,
        })
        .filter(|row| {
            if query.is_empty() {
                return true;
            }
            let full = row.address.to_lowercase();
            let truncated = truncate_string(&row.address, SEARCH_TRUNCATE_LEN).to_lowercase();
            full.contains(&query) || truncated.contains(&query)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::master::{MasterWindows, WindowStats};
    use crate::shared::WalletAddress;

    fn trader(id: &str, address: &str, status: ConnectionStatus) -> MasterTrader {
        MasterTrader {
            id: id.to_string(),
            solana_address: Some(WalletAddress::from(address)),
            eth_address: None,
            trader_type: TraderType::Normal,
            connection_status: status,
        }
    }

    fn detail(address: &str, change_7d: f64) -> MasterDetail {
        MasterDetail {
            address: WalletAddress::from(address),
            windows: MasterWindows {
                d1: None,
                d7: Some(WindowStats {
                    total_change: change_7d,
                    percentage_change: 12.341,
                    win_percentage: 66.666,
                    wins: 4,
                    losses: 2,
                    ..WindowStats::default()
                }),
                d30: None,
            },
            pnl_since: Some("2025-05-30T12:00:00Z".parse().unwrap()),
        }
    }

    #[test]
    fn test_combine_joins_by_address_and_keeps_trader_status() {
        let board = Leaderboard::combine(
            vec![trader("m1", "addr1", ConnectionStatus::Connect)],
            vec![detail("addr1", 80.0)],
        );
        let rows = board.rows_at("2025-06-01T12:00:00Z".parse().unwrap());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, ConnectionStatus::Connect);
        assert_eq!(rows[0].pnl_7d, Some(80.0));
        assert_eq!(rows[0].pnl_percent_7d, Some(12.35));
        assert_eq!(rows[0].win_rate_7d, Some(66.67));
        assert_eq!(rows[0].total_txs_7d(), 6);
        assert_eq!(rows[0].last_time, "2 days ago");
    }

    #[test]
    fn test_trader_without_detail_is_updating() {
        let board = Leaderboard::combine(
            vec![trader("m1", "addr1", ConnectionStatus::NotConnected)],
            vec![],
        );
        let rows = board.rows_at(Utc::now());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pnl_7d, None);
        assert_eq!(stat_label(rows[0].pnl_7d), "updating");
        assert_eq!(rows[0].last_time, "updating");
        assert_eq!(rows[0].pnl_30d, None);
    }

    #[test]
    fn test_trader_without_address_is_dropped() {
        let no_address = MasterTrader {
            id: "m2".to_string(),
            solana_address: None,
            eth_address: None,
            trader_type: TraderType::Normal,
            connection_status: ConnectionStatus::NotConnected,
        };
        let board = Leaderboard::combine(vec![no_address], vec![]);
        assert!(board.rows().is_empty());
    }

    #[test]
    fn test_count_statuses() {
        let board = Leaderboard::combine(
            vec![
                trader("m1", "a1", ConnectionStatus::Connect),
                trader("m2", "a2", ConnectionStatus::Connect),
                trader("m3", "a3", ConnectionStatus::Pause),
                trader("m4", "a4", ConnectionStatus::NotConnected),
            ],
            vec![],
        );
        let counts = count_statuses(&board.rows());

        assert_eq!(counts.all, 4);
        assert_eq!(counts.connected, 2);
        assert_eq!(counts.paused, 1);
        assert_eq!(counts.not_connected, 1);
        assert_eq!(counts.disconnected, 0);
    }

    #[test]
    fn test_filter_by_status() {
        let board = Leaderboard::combine(
            vec![
                trader("m1", "a1", ConnectionStatus::Connect),
                trader("m2", "a2", ConnectionStatus::Pause),
            ],
            vec![],
        );
        let rows = board.rows();

        let paused = filter_rows(&rows, StatusFilter::Status(ConnectionStatus::Pause), "");
        assert_eq!(paused.len(), 1);
        assert_eq!(paused[0].id, "m2");

        let all = filter_rows(&rows, StatusFilter::All, "");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_search_matches_full_and_truncated_forms() {
        let long = "7BgBvyjrZX1YKz4oh9mjb8ZScatkkwb8DzFx7LoiVkM3";
        let board = Leaderboard::combine(
            vec![trader("m1", long, ConnectionStatus::NotConnected)],
            vec![],
        );
        let rows = board.rows();

        // Substring of the full address.
        assert_eq!(filter_rows(&rows, StatusFilter::All, "zx1ykz").len(), 1);
        // The truncated table form, ellipsis included.
        assert_eq!(filter_rows(&rows, StatusFilter::All, "7bgbvy...oivkm3").len(), 1);
        // No match.
        assert_eq!(filter_rows(&rows, StatusFilter::All, "nomatch").len(), 0);
    }
}
