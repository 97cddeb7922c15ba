//! # MemePump SDK
//!
//! A Rust client SDK for the MemePump trading backend: REST queries,
//! WebSocket subscriptions, and a charting-widget datafeed adapter.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, formatting helpers
//! 2. **HTTP API** — `MemepumpHttp` with per-endpoint retry policies
//! 3. **WebSocket** — `tokio-tungstenite` client with reconnect + resubscribe
//! 4. **Datafeed** — pull/push bridge for a charting widget
//! 5. **High-Level Client** — `MemepumpClient` with nested sub-clients and caching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use memepump_sdk::prelude::*;
//!
//! let client = MemepumpClient::builder()
//!     .base_url("https://api.memepump.gg")
//!     .build()?;
//!
//! let coins = client.tokens().top_coins().await?;
//! let history = client
//!     .histories()
//!     .for_token(&HistoryQuery::new("So1111...".into()).recent_swaps())
//!     .await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, timeframes, and formatting helpers.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, state, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Page-level event bus (market cap, last transaction price).
pub mod events;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
pub mod http;

// ── Layer 3: WebSocket ───────────────────────────────────────────────────────

/// WebSocket client: channels, messages, subscriptions, events.
pub mod ws;

// ── Layer 4: Datafeed ────────────────────────────────────────────────────────

/// Charting-widget datafeed adapter.
pub mod datafeed;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `MemepumpClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Timeframe, TokenAddress, TxKind, WalletAddress, SUPPORTED_RESOLUTIONS};

    // Formatting helpers
    pub use crate::shared::fmt::{
        format_number, format_number_with_suffix, format_relative_time, round_up_2dp,
        truncate_string,
    };

    // Domain types — chart
    pub use crate::domain::chart::{rescale_to_market_cap, Bar, PriceMode};

    // Domain types — token
    pub use crate::domain::token::TokenSummary;

    // Domain types — history
    pub use crate::domain::history::state::merge_by_tx;
    pub use crate::domain::history::wire::{HistoryQuery, SortDir};
    pub use crate::domain::history::{Transaction, TransactionLog};

    // Domain types — master
    pub use crate::domain::master::state::{count_statuses, filter_rows, stat_label};
    pub use crate::domain::master::{
        ConnectionStatus, Leaderboard, LeaderboardRow, MasterDetail, MasterTrader, StatusCounts,
        StatusFilter, TraderType, WindowStats,
    };

    // Errors
    pub use crate::error::SdkError;

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_WS_URL};

    // Page events
    pub use crate::events::{PageBus, PageEvent};

    // HTTP client + sub-clients
    pub use crate::client::{
        ChartsClient, HistoriesClient, MastersClient, MemepumpClient, MemepumpClientBuilder,
        TokensClient,
    };
    pub use crate::http::retry::{RetryConfig, RetryPolicy};

    // WebSocket types
    pub use crate::ws::native::WsClient;
    pub use crate::ws::{
        ClientMessage, ServerMessage, SubscribeParams, UnsubscribeParams, WsChannel, WsConfig,
        WsEvent,
    };

    // Datafeed
    pub use crate::datafeed::{Datafeed, DatafeedConfig, History, SymbolInfo};
}
