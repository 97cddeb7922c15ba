//! Masters sub-client — listing, per-address detail, connection management.

use crate::client::MemepumpClient;
use crate::domain::master::wire::ConnectRequest;
use crate::domain::master::{ConnectionStatus, MasterDetail, MasterTrader};
use crate::error::SdkError;
use crate::shared::WalletAddress;
use futures_util::future::join_all;

/// Sub-client for master-trading operations.
pub struct Masters<'a> {
    pub(crate) client: &'a MemepumpClient,
}

impl<'a> Masters<'a> {
    /// Fetch the master-trader listing.
    pub async fn list(&self) -> Result<Vec<MasterTrader>, SdkError> {
        let items = self.client.http.get_masters().await?;
        Ok(items.into_iter().map(MasterTrader::from).collect())
    }

    /// Fetch the windowed PnL detail for one master.
    pub async fn detail(&self, address: &WalletAddress) -> Result<MasterDetail, SdkError> {
        let resp = self.client.http.get_master_detail(address).await?;
        Ok(resp.into_detail(address.clone()))
    }

    /// Fetch details for every listed trader concurrently.
    ///
    /// Traders without an address are skipped; per-trader failures are logged
    /// and dropped so one bad master does not blank the whole leaderboard.
    pub async fn details_for(&self, traders: &[MasterTrader]) -> Vec<MasterDetail> {
        let fetches = traders.iter().filter_map(|t| {
            let address = t.address()?.clone();
            Some(async move {
                match self.detail(&address).await {
                    Ok(detail) => Some(detail),
                    Err(e) => {
                        tracing::warn!("Failed to fetch master detail for {}: {}", address, e);
                        None
                    }
                }
            })
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }

    /// Update the member's connection to a master
    /// (connect / pause / disconnect / reconnect).
    pub async fn set_connection(
        &self,
        master_id: &str,
        status: Option<ConnectionStatus>,
        master_address: &WalletAddress,
    ) -> Result<(), SdkError> {
        let request = ConnectRequest {
            master_id: master_id.to_string(),
            status,
            master_address: master_address.clone(),
        };
        let _: serde_json::Value = self.client.http.post_member_connect(&request).await?;
        Ok(())
    }
}
