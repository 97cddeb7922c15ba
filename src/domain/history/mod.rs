//! History domain — executed swap transactions for a token.

pub mod client;
pub mod state;
pub mod wire;

use crate::shared::{TxKind, WalletAddress};
use chrono::{DateTime, Utc};

pub use state::TransactionLog;

/// One executed transaction. Identity key is the transaction hash `tx`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub time: DateTime<Utc>,
    pub kind: TxKind,
    pub price_usd: f64,
    pub amount: f64,
    pub program: String,
    pub tx: String,
    pub wallet: WalletAddress,
}

impl Transaction {
    /// USD value of the fill.
    pub fn total_usd(&self) -> f64 {
        self.price_usd * self.amount
    }
}
