//! Transaction state container — app-owned, SDK-provided update logic.
//!
//! Holds three feeds for one token: the full REST history, the connected
//! wallet's merged "my orders" view, and the rolling live WebSocket buffer.

use super::Transaction;
use crate::shared::WalletAddress;
use std::collections::{HashSet, VecDeque};

/// Merge a freshly fetched transaction set over an existing one.
///
/// Both sets are sorted newest-first, concatenated fresh-first, and
/// de-duplicated by transaction hash keeping the first occurrence, so on a
/// hash collision the freshly fetched copy wins over the stale one.
pub fn merge_by_tx(fresh: Vec<Transaction>, existing: Vec<Transaction>) -> Vec<Transaction> {
    let mut fresh = fresh;
    let mut existing = existing;
    fresh.sort_by(|a, b| b.time.cmp(&a.time));
    existing.sort_by(|a, b| b.time.cmp(&a.time));

    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<Transaction> = Vec::with_capacity(fresh.len() + existing.len());
    for tx in fresh.into_iter().chain(existing) {
        if seen.insert(tx.tx.clone()) {
            merged.push(tx);
        }
    }

    merged.sort_by(|a, b| b.time.cmp(&a.time));
    merged
}

/// Live + historical transaction feeds for one token.
///
/// The app owns instances of this type. The SDK provides update methods.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    wallet: Option<WalletAddress>,
    history: Vec<Transaction>,
    mine: Vec<Transaction>,
    live: VecDeque<Transaction>,
    live_cap: usize,
}

impl TransactionLog {
    /// Default size of the rolling live buffer.
    pub const DEFAULT_LIVE_CAP: usize = 50;

    pub fn new() -> Self {
        Self {
            live_cap: Self::DEFAULT_LIVE_CAP,
            ..Self::default()
        }
    }

    /// A log that also maintains the "my orders" view for `wallet`.
    pub fn with_wallet(wallet: WalletAddress) -> Self {
        Self {
            wallet: Some(wallet),
            ..Self::new()
        }
    }

    /// Replace the historical feed from a REST refetch.
    ///
    /// When a wallet is set, the wallet's own rows are folded into the merged
    /// "my orders" view; the fresh copies win on hash collision.
    pub fn apply_history(&mut self, rows: Vec<Transaction>) {
        if let Some(wallet) = &self.wallet {
            let own: Vec<Transaction> =
                rows.iter().filter(|t| &t.wallet == wallet).cloned().collect();
            self.mine = merge_by_tx(own, std::mem::take(&mut self.mine));
        }
        self.history = rows;
    }

    /// Fold a REST `my-histories` response under the current "my orders" view.
    /// Rows already present (from newer refetches) keep their fresh copies.
    pub fn apply_my_history(&mut self, rows: Vec<Transaction>) {
        self.mine = merge_by_tx(std::mem::take(&mut self.mine), rows);
    }

    /// Prepend a live WebSocket transaction, evicting past the buffer cap.
    pub fn push_live(&mut self, tx: Transaction) {
        self.live.push_front(tx);
        self.live.truncate(self.live_cap);
    }

    /// Live-buffer entries followed by the historical rows, the order the
    /// all-transactions table renders them in.
    pub fn combined(&self) -> impl Iterator<Item = &Transaction> {
        self.live.iter().chain(self.history.iter())
    }

    /// The merged "my orders" view, newest first.
    pub fn my_transactions(&self) -> &[Transaction] {
        &self.mine
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn live(&self) -> &VecDeque<Transaction> {
        &self.live
    }

    /// Price of the most recent historical row. Feeds the page-level
    /// last-transaction-price event.
    pub fn latest_price_usd(&self) -> Option<f64> {
        self.history.first().map(|t| t.price_usd)
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.mine.clear();
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::TxKind;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn tx(hash: &str, secs: i64, wallet: &str) -> Transaction {
        Transaction {
            time: at(secs),
            kind: TxKind::Buy,
            price_usd: 0.5,
            amount: 10.0,
            program: "raydium".to_string(),
            tx: hash.to_string(),
            wallet: WalletAddress::from(wallet),
        }
    }

    #[test]
    fn test_merge_fresh_copy_wins() {
        let fresh = vec![tx("a", 200, "w1")];
        let existing = vec![tx("a", 100, "w1"), tx("b", 50, "w1")];

        let merged = merge_by_tx(fresh, existing);

        let keys: Vec<(&str, i64)> = merged
            .iter()
            .map(|t| (t.tx.as_str(), t.time.timestamp()))
            .collect();
        assert_eq!(keys, [("a", 200), ("b", 50)]);
    }

    #[test]
    fn test_merge_sorts_descending() {
        let fresh = vec![tx("c", 10, "w1"), tx("d", 500, "w1")];
        let existing = vec![tx("e", 300, "w1")];

        let merged = merge_by_tx(fresh, existing);

        let hashes: Vec<&str> = merged.iter().map(|t| t.tx.as_str()).collect();
        assert_eq!(hashes, ["d", "e", "c"]);
    }

    #[test]
    fn test_apply_history_folds_own_rows() {
        let mut log = TransactionLog::with_wallet(WalletAddress::from("me"));
        log.apply_my_history(vec![tx("old", 100, "me")]);

        log.apply_history(vec![
            tx("new", 200, "me"),
            tx("other", 150, "someone-else"),
        ]);

        let mine: Vec<&str> = log.my_transactions().iter().map(|t| t.tx.as_str()).collect();
        assert_eq!(mine, ["new", "old"]);
        assert_eq!(log.history().len(), 2);
    }

    #[test]
    fn test_apply_history_refreshes_stale_copy() {
        let mut log = TransactionLog::with_wallet(WalletAddress::from("me"));
        log.apply_my_history(vec![tx("a", 100, "me")]);

        // Refetch returns the same hash with a corrected timestamp.
        log.apply_history(vec![tx("a", 250, "me")]);

        assert_eq!(log.my_transactions().len(), 1);
        assert_eq!(log.my_transactions()[0].time.timestamp(), 250);
    }

    #[test]
    fn test_live_buffer_caps_at_50() {
        let mut log = TransactionLog::new();
        for i in 0..60 {
            log.push_live(tx(&format!("t{}", i), i, "w1"));
        }
        assert_eq!(log.live().len(), 50);
        // Newest first; the ten oldest fell off.
        assert_eq!(log.live().front().unwrap().tx, "t59");
        assert_eq!(log.live().back().unwrap().tx, "t10");
    }

    #[test]
    fn test_combined_is_live_then_history() {
        let mut log = TransactionLog::new();
        log.apply_history(vec![tx("h1", 100, "w1")]);
        log.push_live(tx("l1", 200, "w1"));

        let order: Vec<&str> = log.combined().map(|t| t.tx.as_str()).collect();
        assert_eq!(order, ["l1", "h1"]);
    }

    #[test]
    fn test_latest_price_usd() {
        let mut log = TransactionLog::new();
        assert_eq!(log.latest_price_usd(), None);

        let mut first = tx("h1", 100, "w1");
        first.price_usd = 0.0042;
        log.apply_history(vec![first, tx("h2", 50, "w1")]);
        assert_eq!(log.latest_price_usd(), Some(0.0042));
    }
}
