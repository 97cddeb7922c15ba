//! Tokens sub-client — top-coins listing with a TTL cache.

use crate::client::MemepumpClient;
use crate::domain::token::TokenSummary;
use crate::error::SdkError;
use std::time::Instant;

/// Sub-client for token listing operations.
pub struct Tokens<'a> {
    pub(crate) client: &'a MemepumpClient,
}

impl<'a> Tokens<'a> {
    /// Get the top-coins board. Uses a TTL cache so that every mounted view
    /// polling the board does not re-hit the backend.
    pub async fn top_coins(&self) -> Result<Vec<TokenSummary>, SdkError> {
        {
            let cache = self.client.top_coins_cache.read().await;
            if let Some((coins, fetched_at)) = cache.as_ref() {
                if fetched_at.elapsed() < self.client.top_coins_cache_ttl {
                    return Ok(coins.clone());
                }
            }
        }

        let coins: Vec<TokenSummary> = self
            .client
            .http
            .get_top_coins()
            .await?
            .into_iter()
            .map(TokenSummary::from)
            .collect();

        *self.client.top_coins_cache.write().await = Some((coins.clone(), Instant::now()));
        Ok(coins)
    }

    /// Drop the cached top-coins board.
    pub async fn invalidate(&self) {
        *self.client.top_coins_cache.write().await = None;
    }
}
