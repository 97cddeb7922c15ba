//! Chart datafeed adapter.
//!
//! Bridges the pull/push contract a charting widget expects (ready / search /
//! resolve / history / subscribe / unsubscribe) onto the REST chart endpoint
//! and the `/chart` WebSocket namespace. One `Datafeed` serves one token at
//! one resolution, matching the widget's per-chart lifecycle.

pub mod symbols;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use tokio::sync::{broadcast, oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::domain::chart::{rescale_to_market_cap, Bar, PriceMode};
use crate::error::SdkError;
use crate::events::{PageBus, PageEvent};
use crate::http::MemepumpHttp;
use crate::shared::{Timeframe, TokenAddress};
use crate::ws::native::WsClient;
use crate::ws::{ClientMessage, ServerMessage, SubscribeParams, WsConfig, WsEvent};

pub use symbols::{DatafeedConfig, SymbolInfo, SymbolSearchResult};

/// Minimum spacing between history fetches.
const REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

/// Result of a history pull.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub bars: Vec<Bar>,
    /// `true` when the widget should stop paging back: the range was empty,
    /// the fetch failed, or the request was throttled.
    pub no_data: bool,
}

impl History {
    fn none() -> Self {
        Self {
            bars: Vec::new(),
            no_data: true,
        }
    }
}

type BarCallback = Box<dyn Fn(Bar) + Send + Sync>;

// ─── Request gate ────────────────────────────────────────────────────────────

/// Serializes history fetches: at most one in flight, at most one per
/// [`REQUEST_INTERVAL`]. A rejected call costs no network traffic.
#[derive(Debug)]
struct RequestGate {
    min_interval: Duration,
    last_request: Option<Instant>,
    in_flight: bool,
}

impl RequestGate {
    fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
            in_flight: false,
        }
    }

    fn try_acquire(&mut self, now: Instant) -> bool {
        if self.in_flight {
            return false;
        }
        if let Some(last) = self.last_request {
            if now.duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.in_flight = true;
        self.last_request = Some(now);
        true
    }

    fn release(&mut self) {
        self.in_flight = false;
    }
}

// ─── Live stream state ───────────────────────────────────────────────────────

/// State shared between the datafeed and its pump task.
struct StreamShared {
    token_address: TokenAddress,
    mode: PriceMode,
    subscribers: Mutex<HashMap<String, BarCallback>>,
    /// Most recent market cap seen on the page bus for this token.
    market_cap: Mutex<Option<f64>>,
    /// Most recent raw bar from the socket, for market-cap-only re-emits.
    last_bar: Mutex<Option<Bar>>,
}

impl StreamShared {
    /// Forward a live bar to every subscriber, rescaled in market-cap mode.
    async fn store_and_emit(&self, bar: Bar) {
        *self.last_bar.lock().await = Some(bar);

        let emitted = if self.mode == PriceMode::MarketCap {
            match *self.market_cap.lock().await {
                Some(market_cap) => rescale_to_market_cap(&bar, market_cap),
                None => bar,
            }
        } else {
            bar
        };

        for callback in self.subscribers.lock().await.values() {
            callback(emitted);
        }
    }

    /// Record a market-cap change; in market-cap mode, re-emit the latest bar
    /// rescaled to it so the chart ticks without waiting for the next candle.
    async fn apply_market_cap(&self, market_cap: f64) {
        *self.market_cap.lock().await = Some(market_cap);

        if self.mode != PriceMode::MarketCap {
            return;
        }
        let last = *self.last_bar.lock().await;
        if let Some(bar) = last {
            let emitted = rescale_to_market_cap(&bar, market_cap);
            for callback in self.subscribers.lock().await.values() {
                callback(emitted);
            }
        }
    }
}

/// Handle to the running socket + pump, torn down when the last subscriber
/// leaves.
struct LiveStream {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

// ─── Datafeed ────────────────────────────────────────────────────────────────

/// Datafeed for one token chart.
pub struct Datafeed {
    symbol: String,
    resolution: Timeframe,
    http: MemepumpHttp,
    ws_config: WsConfig,
    bus: PageBus,
    gate: Mutex<RequestGate>,
    shared: Arc<StreamShared>,
    live: Mutex<Option<LiveStream>>,
}

impl Datafeed {
    pub fn new(
        symbol: impl Into<String>,
        token_address: TokenAddress,
        resolution: Timeframe,
        mode: PriceMode,
        http: MemepumpHttp,
        ws_config: WsConfig,
        bus: PageBus,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            resolution,
            http,
            ws_config,
            bus,
            gate: Mutex::new(RequestGate::new(REQUEST_INTERVAL)),
            shared: Arc::new(StreamShared {
                token_address,
                mode,
                subscribers: Mutex::new(HashMap::new()),
                market_cap: Mutex::new(None),
                last_bar: Mutex::new(None),
            }),
            live: Mutex::new(None),
        }
    }

    /// Static widget configuration: supported resolutions, exchange, symbol
    /// types.
    pub fn on_ready(&self) -> DatafeedConfig {
        DatafeedConfig::default()
    }

    /// Synthesize symbol metadata. Always succeeds.
    pub fn resolve_symbol(&self, symbol_name: &str) -> SymbolInfo {
        SymbolInfo::for_symbol(symbol_name)
    }

    /// The widget's symbol search. This feed serves exactly one symbol.
    pub fn search_symbols(&self, _user_input: &str) -> Vec<SymbolSearchResult> {
        vec![SymbolSearchResult {
            symbol: self.symbol.clone(),
            full_name: self.symbol.clone(),
            description: self.symbol.clone(),
            exchange: symbols::EXCHANGE.to_string(),
            symbol_type: symbols::SYMBOL_TYPE.to_string(),
        }]
    }

    /// Pull historical bars for `[time_from, time_to]` (epoch seconds).
    ///
    /// Calls are throttled to one per second: a rejected call returns
    /// `no_data` without touching the network. Fetch failures are logged and
    /// degrade to an empty history. An unknown resolution code is the one
    /// hard error.
    pub async fn get_bars(
        &self,
        resolution: &str,
        time_from: u64,
        time_to: u64,
    ) -> Result<History, SdkError> {
        let timeframe = Timeframe::from_widget(resolution).ok_or_else(|| {
            SdkError::Validation(format!("Unsupported resolution: {}", resolution))
        })?;

        if !self.gate.lock().await.try_acquire(Instant::now()) {
            return Ok(History::none());
        }

        let result = self
            .http
            .get_chart(
                &self.shared.token_address,
                timeframe,
                time_from,
                time_to,
                self.shared.mode,
            )
            .await;

        self.gate.lock().await.release();

        match result {
            Ok(resp) => {
                let bars: Vec<Bar> = resp.oclhv.into_iter().map(Bar::from).collect();
                Ok(History {
                    no_data: bars.is_empty(),
                    bars,
                })
            }
            Err(e) => {
                tracing::warn!("Error fetching chart data: {}", e);
                Ok(History::none())
            }
        }
    }

    /// Register a live-bar callback under the widget's subscriber UID.
    ///
    /// The first subscriber opens the `/chart` socket, emits the subscribe
    /// message, and starts the pump that fans updates out to all callbacks.
    pub async fn subscribe_bars(
        &self,
        subscriber_uid: impl Into<String>,
        callback: impl Fn(Bar) + Send + Sync + 'static,
    ) -> Result<(), SdkError> {
        self.shared
            .subscribers
            .lock()
            .await
            .insert(subscriber_uid.into(), Box::new(callback));

        let mut live = self.live.lock().await;
        if live.is_none() {
            *live = Some(self.start_stream().await?);
        }
        Ok(())
    }

    /// Drop a subscriber. When the last one leaves, the socket is told to
    /// unsubscribe, disconnected, and the pump stops — exactly once, and
    /// repeated calls are no-ops.
    pub async fn unsubscribe_bars(&self, subscriber_uid: &str) {
        let remaining = {
            let mut subscribers = self.shared.subscribers.lock().await;
            subscribers.remove(subscriber_uid);
            subscribers.len()
        };

        if remaining == 0 {
            if let Some(stream) = self.live.lock().await.take() {
                let _ = stream.shutdown.send(());
                let _ = tokio::time::timeout(Duration::from_secs(5), stream.handle).await;
            }
        }
    }

    /// Whether the live socket + pump are currently up.
    pub async fn is_streaming(&self) -> bool {
        self.live.lock().await.is_some()
    }

    pub async fn subscriber_count(&self) -> usize {
        self.shared.subscribers.lock().await.len()
    }

    async fn start_stream(&self) -> Result<LiveStream, SdkError> {
        let mut client = WsClient::new(self.ws_config.clone());
        client.connect().await?;
        client.subscribe(SubscribeParams::Chart {
            token_address: self.shared.token_address.clone(),
            timeframe: self.resolution,
        })?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let shared = Arc::clone(&self.shared);
        let bus_rx = self.bus.subscribe();
        let handle = tokio::spawn(pump(client, shared, bus_rx, shutdown_rx));

        Ok(LiveStream {
            shutdown: shutdown_tx,
            handle,
        })
    }
}

// ─── Pump task ───────────────────────────────────────────────────────────────

/// Owns the socket for the lifetime of the subscription set: forwards chart
/// updates to subscribers, folds in market-cap events from the page bus, and
/// tears the connection down on shutdown (or when the datafeed is dropped).
async fn pump(
    mut client: WsClient,
    shared: Arc<StreamShared>,
    mut bus_rx: broadcast::Receiver<PageEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut bus_open = true;
    {
        let events = client.events();
        tokio::pin!(events);

        loop {
            tokio::select! {
                event = events.next() => match event {
                    Some(WsEvent::Message(ServerMessage::ChartUpdate(bar))) => {
                        shared.store_and_emit(bar).await;
                    }
                    Some(WsEvent::Message(ServerMessage::SubscriptionError(err))) => {
                        tracing::error!("WebSocket subscription error: {}", err.message);
                    }
                    Some(WsEvent::Disconnected { code, reason }) => {
                        tracing::debug!(?code, %reason, "Chart socket disconnected");
                    }
                    Some(WsEvent::Error(e)) => {
                        tracing::warn!("Chart socket error: {}", e);
                    }
                    Some(_) => {}
                    None => break,
                },

                bus_event = bus_rx.recv(), if bus_open => match bus_event {
                    Ok(PageEvent::MarketCapUpdate { token_address, market_cap })
                        if token_address == shared.token_address =>
                    {
                        shared.apply_market_cap(market_cap).await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!("Dropped {} page events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        bus_open = false;
                    }
                },

                _ = &mut shutdown_rx => break,
            }
        }
    }

    let _ = client.send(ClientMessage::UnsubscribeFromChart {
        token_address: shared.token_address.clone(),
    });
    let _ = client.disconnect().await;
}
