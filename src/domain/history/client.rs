//! Histories sub-client — transaction history queries.

use crate::client::MemepumpClient;
use crate::domain::history::wire::HistoryQuery;
use crate::domain::history::Transaction;
use crate::error::SdkError;
use crate::shared::{TokenAddress, WalletAddress};

/// Sub-client for order-history operations.
pub struct Histories<'a> {
    pub(crate) client: &'a MemepumpClient,
}

impl<'a> Histories<'a> {
    /// Fetch the transaction history for a token.
    pub async fn for_token(&self, query: &HistoryQuery) -> Result<Vec<Transaction>, SdkError> {
        let items = self.client.http.get_histories(query).await?;
        Ok(items.into_iter().map(Transaction::from).collect())
    }

    /// Fetch the connected wallet's own transactions for a token.
    pub async fn mine(
        &self,
        address: &TokenAddress,
        wallet: &WalletAddress,
    ) -> Result<Vec<Transaction>, SdkError> {
        let items = self.client.http.get_my_histories(address, wallet).await?;
        Ok(items.into_iter().map(Transaction::from).collect())
    }
}
