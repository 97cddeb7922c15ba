//! WebSocket layer — channels, messages, subscriptions, events.
//!
//! The backend exposes one namespace per feed (`/chart`, `/token-txs`); both
//! speak the same `{"event": ..., "data": {...}}` frame format. The transport
//! lives in `native.rs`; this module defines the shared message/event types.

pub mod native;
pub mod subscriptions;

use crate::domain::chart::Bar;
use crate::domain::history::wire::TransactionResponse;
use crate::shared::{Timeframe, TokenAddress};
use serde::{Deserialize, Serialize};

pub use subscriptions::{SubscribeParams, Subscription, UnsubscribeParams};

// ─── Channels ────────────────────────────────────────────────────────────────

/// Backend WebSocket namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WsChannel {
    /// Live candle updates for one token + timeframe.
    Chart,
    /// Live transaction feed for one token.
    TokenTxs,
}

impl WsChannel {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Chart => "/chart",
            Self::TokenTxs => "/token-txs",
        }
    }

    /// Join the namespace path onto a WS base URL.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

// ─── Outbound messages ───────────────────────────────────────────────────────

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "subscribeToChart", rename_all = "camelCase")]
    SubscribeToChart {
        token_address: TokenAddress,
        timeframe: Timeframe,
    },
    #[serde(rename = "unsubscribeFromChart", rename_all = "camelCase")]
    UnsubscribeFromChart { token_address: TokenAddress },
    #[serde(rename = "subscribe", rename_all = "camelCase")]
    Subscribe { token_address: TokenAddress },
    #[serde(rename = "unsubscribe", rename_all = "camelCase")]
    Unsubscribe { token_address: TokenAddress },
}

// ─── Inbound messages ────────────────────────────────────────────────────────

/// Messages pushed by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "chartUpdate")]
    ChartUpdate(Bar),
    #[serde(rename = "subscriptionError")]
    SubscriptionError(ServerError),
    #[serde(rename = "transaction")]
    Transaction(TransactionResponse),
    #[serde(rename = "subscribed", rename_all = "camelCase")]
    Subscribed { token_address: TokenAddress },
    #[serde(rename = "error")]
    Error(ServerError),
}

/// Error payload of `subscriptionError` / `error` frames.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

// ─── WsEvent ─────────────────────────────────────────────────────────────────

/// High-level events emitted by the WS client to the consumer.
#[derive(Debug, Clone)]
pub enum WsEvent {
    /// A parsed message from the server.
    Message(ServerMessage),
    /// Connection established.
    Connected,
    /// Connection lost (may trigger reconnect).
    Disconnected { code: Option<u16>, reason: String },
    /// A deserialization or protocol error.
    Error(String),
    /// Reconnection gave up after the configured attempt cap.
    MaxReconnectReached,
}

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Closed = 2,
}

impl From<u16> for ReadyState {
    fn from(v: u16) -> Self {
        match v {
            0 => Self::Connecting,
            1 => Self::Open,
            _ => Self::Closed,
        }
    }
}

/// Configuration for the WS client.
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Full channel URL, e.g. `wss://ws.memepump.gg/chart`.
    pub url: String,
    pub reconnect: bool,
    pub base_reconnect_delay_ms: u32,
    pub max_reconnect_attempts: u32,
}

impl WsConfig {
    /// Config for one namespace under a WS base URL.
    pub fn for_channel(base: &str, channel: WsChannel) -> Self {
        Self {
            url: channel.url(base),
            ..Self::default()
        }
    }
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: WsChannel::Chart.url(crate::network::DEFAULT_WS_URL),
            reconnect: true,
            base_reconnect_delay_ms: 2000,
            max_reconnect_attempts: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_urls() {
        assert_eq!(
            WsChannel::Chart.url("wss://ws.memepump.gg"),
            "wss://ws.memepump.gg/chart"
        );
        assert_eq!(
            WsChannel::TokenTxs.url("wss://ws.memepump.gg/"),
            "wss://ws.memepump.gg/token-txs"
        );
    }

    #[test]
    fn test_subscribe_to_chart_framing() {
        let msg = ClientMessage::SubscribeToChart {
            token_address: TokenAddress::from("tok1"),
            timeframe: Timeframe::Day1,
        };
        let parsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();

        assert_eq!(parsed["event"], "subscribeToChart");
        assert_eq!(parsed["data"]["tokenAddress"], "tok1");
        // The socket wants the lowercase timeframe spelling.
        assert_eq!(parsed["data"]["timeframe"], "1d");
    }

    #[test]
    fn test_unsubscribe_framing_has_no_timeframe() {
        let msg = ClientMessage::UnsubscribeFromChart {
            token_address: TokenAddress::from("tok1"),
        };
        let parsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();

        assert_eq!(parsed["event"], "unsubscribeFromChart");
        assert_eq!(parsed["data"]["tokenAddress"], "tok1");
        assert!(parsed["data"].get("timeframe").is_none());
    }

    #[test]
    fn test_chart_update_parses() {
        let frame = r#"{
            "event": "chartUpdate",
            "data": {"time": 1700000000000, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 10.0}
        }"#;
        let msg: ServerMessage = serde_json::from_str(frame).unwrap();
        match msg {
            ServerMessage::ChartUpdate(bar) => {
                assert_eq!(bar.time, 1_700_000_000_000);
                assert_eq!(bar.close, 1.5);
            }
            other => panic!("expected ChartUpdate, got {:?}", other),
        }
    }

    #[test]
    fn test_transaction_frame_parses() {
        let frame = r#"{
            "event": "transaction",
            "data": {
                "time": 1740076800000,
                "type": "sell",
                "priceUsd": 0.002,
                "amount": 500.0,
                "program": "pumpfun",
                "tx": "sig9",
                "wallet": "w9"
            }
        }"#;
        let msg: ServerMessage = serde_json::from_str(frame).unwrap();
        assert!(matches!(msg, ServerMessage::Transaction(_)));
    }

    #[test]
    fn test_subscription_error_parses() {
        let frame = r#"{"event": "subscriptionError", "data": {"message": "unknown token"}}"#;
        let msg: ServerMessage = serde_json::from_str(frame).unwrap();
        match msg {
            ServerMessage::SubscriptionError(err) => {
                assert_eq!(err.message, "unknown token");
                assert!(err.code.is_none());
            }
            other => panic!("expected SubscriptionError, got {:?}", other),
        }
    }
}
