//! High-level client — `MemepumpClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::datafeed::Datafeed;
use crate::domain::chart::client::Charts;
use crate::domain::chart::PriceMode;
use crate::domain::history::client::Histories;
use crate::domain::master::client::Masters;
use crate::domain::token::client::Tokens;
use crate::domain::token::TokenSummary;
use crate::error::SdkError;
use crate::events::PageBus;
use crate::http::MemepumpHttp;
use crate::shared::{Timeframe, TokenAddress};
use crate::ws::native::WsClient;
use crate::ws::{WsChannel, WsConfig};

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

// Re-export sub-client types for convenience.
pub use crate::domain::chart::client::Charts as ChartsClient;
pub use crate::domain::history::client::Histories as HistoriesClient;
pub use crate::domain::master::client::Masters as MastersClient;
pub use crate::domain::token::client::Tokens as TokensClient;

/// The primary entry point for the MemePump SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.charts()`, `client.histories()`, etc.
pub struct MemepumpClient {
    pub(crate) http: MemepumpHttp,
    pub(crate) ws_url: String,
    /// Page-level event bus shared by datafeeds and publishers.
    pub(crate) bus: PageBus,
    /// Top-coins cache: (rows, fetched_at)
    pub(crate) top_coins_cache: Arc<RwLock<Option<(Vec<TokenSummary>, Instant)>>>,
    pub(crate) top_coins_cache_ttl: Duration,
}

impl MemepumpClient {
    pub fn builder() -> MemepumpClientBuilder {
        MemepumpClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn charts(&self) -> Charts<'_> {
        Charts { client: self }
    }

    pub fn tokens(&self) -> Tokens<'_> {
        Tokens { client: self }
    }

    pub fn histories(&self) -> Histories<'_> {
        Histories { client: self }
    }

    pub fn masters(&self) -> Masters<'_> {
        Masters { client: self }
    }

    // ── WebSocket ────────────────────────────────────────────────────────

    /// Config for one WS namespace under this client's WS base URL.
    ///
    /// The WS client is intentionally not embedded in `MemepumpClient`
    /// because socket lifetimes are managed at the application layer
    /// (typically tied to a view's mount/unmount).
    pub fn ws_config(&self, channel: WsChannel) -> WsConfig {
        WsConfig::for_channel(&self.ws_url, channel)
    }

    /// Create a new WS client for a namespace. Does not connect yet.
    pub fn ws(&self, channel: WsChannel) -> WsClient {
        WsClient::new(self.ws_config(channel))
    }

    // ── Page events ──────────────────────────────────────────────────────

    /// The shared page-level event bus.
    pub fn page_bus(&self) -> &PageBus {
        &self.bus
    }

    // ── Datafeed ─────────────────────────────────────────────────────────

    /// Build a chart datafeed wired to this client's HTTP, WS config, and
    /// page bus.
    pub fn datafeed(
        &self,
        symbol: impl Into<String>,
        token_address: TokenAddress,
        resolution: Timeframe,
        mode: PriceMode,
    ) -> Datafeed {
        Datafeed::new(
            symbol,
            token_address,
            resolution,
            mode,
            self.http.clone(),
            self.ws_config(WsChannel::Chart),
            self.bus.clone(),
        )
    }

    // ── Auth ─────────────────────────────────────────────────────────────

    /// Set the bearer token attached to REST calls.
    pub async fn set_auth_token(&self, token: impl Into<String>) {
        self.http.set_auth_token(Some(token.into())).await;
    }

    /// Stop attaching a bearer token.
    pub async fn clear_auth_token(&self) {
        self.http.clear_auth_token().await;
    }

    // ── Caches ───────────────────────────────────────────────────────────

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        *self.top_coins_cache.write().await = None;
    }
}

impl Clone for MemepumpClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            ws_url: self.ws_url.clone(),
            bus: self.bus.clone(),
            top_coins_cache: self.top_coins_cache.clone(),
            top_coins_cache_ttl: self.top_coins_cache_ttl,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MemepumpClientBuilder {
    base_url: String,
    ws_url: String,
    top_coins_cache_ttl: Duration,
    auth_token: Option<String>,
}

impl Default for MemepumpClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            ws_url: crate::network::DEFAULT_WS_URL.to_string(),
            top_coins_cache_ttl: Duration::from_secs(30),
            auth_token: None,
        }
    }
}

impl MemepumpClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn ws_url(mut self, url: &str) -> Self {
        self.ws_url = url.to_string();
        self
    }

    pub fn top_coins_cache_ttl(mut self, ttl: Duration) -> Self {
        self.top_coins_cache_ttl = ttl;
        self
    }

    /// Pre-set a bearer token on construction.
    pub fn auth_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    pub fn build(self) -> Result<MemepumpClient, SdkError> {
        Ok(MemepumpClient {
            http: MemepumpHttp::new_with_token(&self.base_url, self.auth_token),
            ws_url: self.ws_url.trim_end_matches('/').to_string(),
            bus: PageBus::new(),
            top_coins_cache: Arc::new(RwLock::new(None)),
            top_coins_cache_ttl: self.top_coins_cache_ttl,
        })
    }
}
