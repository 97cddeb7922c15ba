//! Charts sub-client — historical OHLCV queries.

use crate::client::MemepumpClient;
use crate::domain::chart::{Bar, PriceMode};
use crate::error::SdkError;
use crate::shared::{Timeframe, TokenAddress};

/// Sub-client for chart history operations.
pub struct Charts<'a> {
    pub(crate) client: &'a MemepumpClient,
}

impl<'a> Charts<'a> {
    /// Fetch historical bars for `[time_from, time_to]` (epoch seconds).
    ///
    /// Bar times are normalized to epoch milliseconds.
    pub async fn get_bars(
        &self,
        address: &TokenAddress,
        timeframe: Timeframe,
        time_from: u64,
        time_to: u64,
        mode: PriceMode,
    ) -> Result<Vec<Bar>, SdkError> {
        let resp = self
            .client
            .http
            .get_chart(address, timeframe, time_from, time_to, mode)
            .await?;
        Ok(resp.oclhv.into_iter().map(Bar::from).collect())
    }
}
