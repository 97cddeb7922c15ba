//! Integration tests for the native WebSocket client.
//!
//! These connect to a live WS deployment and exercise the full
//! connect → subscribe → receive → unsubscribe → disconnect lifecycle.
//!
//! All tests are `#[ignore]` because they require network access:
//!
//! ```bash
//! cargo test --test ws_native_integration -- --ignored
//! ```

use std::time::Duration;

use futures_util::StreamExt;
use tokio::time::timeout;

use memepump_sdk::prelude::*;

const TEST_TIMEOUT: Duration = Duration::from_secs(15);

fn ws_base() -> String {
    dotenvy::dotenv().ok();
    std::env::var("MEMEPUMP_WS_URL").unwrap_or_else(|_| DEFAULT_WS_URL.to_string())
}

fn test_token() -> TokenAddress {
    dotenvy::dotenv().ok();
    std::env::var("MEMEPUMP_TEST_TOKEN")
        .unwrap_or_else(|_| "So11111111111111111111111111111111111111112".to_string())
        .into()
}

fn config_for(channel: WsChannel) -> WsConfig {
    WsConfig {
        reconnect: false,
        ..WsConfig::for_channel(&ws_base(), channel)
    }
}

/// Connect and wait for the `Connected` event.
async fn connected_client(channel: WsChannel) -> WsClient {
    let mut client = WsClient::new(config_for(channel));
    client.connect().await.expect("connect should succeed");

    {
        let events = client.events();
        tokio::pin!(events);

        let first = timeout(TEST_TIMEOUT, events.next())
            .await
            .expect("timed out waiting for Connected")
            .expect("event stream ended");

        assert!(
            matches!(first, WsEvent::Connected),
            "first event should be Connected, got: {first:?}"
        );
    }

    client
}

/// Wait for the next event that matches the predicate, ignoring others.
async fn next_matching(client: &WsClient, predicate: impl Fn(&WsEvent) -> bool) -> WsEvent {
    let events = client.events();
    tokio::pin!(events);

    timeout(TEST_TIMEOUT, async {
        while let Some(ev) = events.next().await {
            if predicate(&ev) {
                return ev;
            }
        }
        panic!("event stream ended without a matching event");
    })
    .await
    .expect("timed out waiting for matching event")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn connect_and_receive_connected_event() {
    let mut client = connected_client(WsChannel::Chart).await;
    assert!(client.is_connected());
    client.disconnect().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn subscribe_chart_receives_updates() {
    let mut client = connected_client(WsChannel::Chart).await;

    client
        .subscribe(SubscribeParams::Chart {
            token_address: test_token(),
            timeframe: Timeframe::Sec1,
        })
        .expect("subscribe chart");

    let event = next_matching(&client, |ev| {
        matches!(ev, WsEvent::Message(ServerMessage::ChartUpdate(_)))
    })
    .await;

    match event {
        WsEvent::Message(ServerMessage::ChartUpdate(bar)) => {
            assert!(bar.low <= bar.high);
        }
        other => panic!("expected ChartUpdate, got {other:?}"),
    }

    client.disconnect().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn subscribe_token_txs_acknowledged() {
    let mut client = connected_client(WsChannel::TokenTxs).await;

    let token = test_token();
    client
        .subscribe(SubscribeParams::TokenTxs {
            token_address: token.clone(),
        })
        .expect("subscribe txs");

    let event = next_matching(&client, |ev| {
        matches!(ev, WsEvent::Message(ServerMessage::Subscribed { .. }))
    })
    .await;

    match event {
        WsEvent::Message(ServerMessage::Subscribed { token_address }) => {
            assert_eq!(token_address, token);
        }
        other => panic!("expected Subscribed, got {other:?}"),
    }

    client.disconnect().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn unsubscribe_then_disconnect_cleanly() {
    let mut client = connected_client(WsChannel::TokenTxs).await;

    let sub = SubscribeParams::TokenTxs {
        token_address: test_token(),
    };
    client.subscribe(sub.clone()).expect("subscribe");
    client.unsubscribe(&sub).expect("unsubscribe");
    client.disconnect().await.unwrap();
    assert!(!client.is_connected());
}
