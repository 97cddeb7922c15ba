//! Wire types and query parameters for the histories endpoints.

use super::Transaction;
use crate::shared::serde_util::flexible_time;
use crate::shared::{TokenAddress, TxKind, WalletAddress};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A history item as the backend sends it.
///
/// `time` arrives as epoch millis on some endpoints and RFC 3339 on others.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    #[serde(with = "flexible_time")]
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(rename = "priceUsd", default)]
    pub price_usd: f64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub program: String,
    pub tx: String,
    pub wallet: WalletAddress,
}

impl From<TransactionResponse> for Transaction {
    fn from(r: TransactionResponse) -> Self {
        Self {
            time: r.time,
            kind: r.kind,
            price_usd: r.price_usd,
            amount: r.amount,
            program: r.program,
            tx: r.tx,
            wallet: r.wallet,
        }
    }
}

/// Sort direction for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query parameters for `GET /api/v1/on-chain/histories`.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub address: TokenAddress,
    pub offset: u32,
    pub limit: u32,
    pub sort_by: Option<String>,
    pub sort_type: Option<SortDir>,
    pub tx_type: Option<String>,
    pub owner: Option<WalletAddress>,
}

impl HistoryQuery {
    pub fn new(address: TokenAddress) -> Self {
        Self {
            address,
            offset: 0,
            limit: 100,
            sort_by: None,
            sort_type: None,
            tx_type: None,
            owner: None,
        }
    }

    pub fn page(mut self, offset: u32, limit: u32) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Newest-first swaps, the query every dashboard view issues.
    pub fn recent_swaps(mut self) -> Self {
        self.sort_by = Some("block_unix_time".to_string());
        self.sort_type = Some(SortDir::Desc);
        self.tx_type = Some("swap".to_string());
        self
    }

    pub fn owner(mut self, owner: WalletAddress) -> Self {
        self.owner = Some(owner);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_response_millis_time() {
        let body = r#"{
            "time": 1740076800000,
            "type": "buy",
            "priceUsd": 0.0021,
            "amount": 1000.0,
            "program": "raydium",
            "tx": "sig1",
            "wallet": "wallet1"
        }"#;
        let resp: TransactionResponse = serde_json::from_str(body).unwrap();
        let tx: Transaction = resp.into();
        assert_eq!(tx.kind, TxKind::Buy);
        assert_eq!(tx.time.timestamp_millis(), 1740076800000);
        assert_eq!(tx.total_usd(), 0.0021 * 1000.0);
    }

    #[test]
    fn test_query_builder() {
        let q = HistoryQuery::new(TokenAddress::from("tok1"))
            .page(0, 50)
            .recent_swaps()
            .owner(WalletAddress::from("me"));
        assert_eq!(q.limit, 50);
        assert_eq!(q.sort_by.as_deref(), Some("block_unix_time"));
        assert_eq!(q.sort_type, Some(SortDir::Desc));
        assert_eq!(q.tx_type.as_deref(), Some("swap"));
        assert_eq!(q.owner.as_ref().unwrap().as_str(), "me");
    }
}
