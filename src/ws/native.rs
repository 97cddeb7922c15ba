//! Native WebSocket client — `tokio-tungstenite`.
//!
//! - Background tokio task owns the connection
//! - Exponential backoff reconnection with jitter
//! - Subscription tracking + auto-resubscribe on reconnect
//! - Message queue when disconnected (pending messages flushed on reconnect)
//! - Stream-based event delivery to the consumer
//!
//! The backend has no application-level ping event; protocol-level pings from
//! the server are answered with pongs.

use std::pin::Pin;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream, Stream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::WsError;
use crate::ws::subscriptions::Subscription;
use crate::ws::{ClientMessage, ReadyState, ServerMessage, SubscribeParams, WsConfig, WsEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ─── Commands from public API to background task ─────────────────────────────

enum Command {
    Send(ClientMessage),
    Disconnect,
}

// ─── Disconnect reasons for reconnection decision ────────────────────────────

enum DisconnectReason {
    UserRequested,
    NormalClose,
    RateLimited,
    Error(String),
}

// ─── Background task state ───────────────────────────────────────────────────

struct TaskState {
    config: WsConfig,
    event_tx: mpsc::Sender<WsEvent>,
    cmd_rx: mpsc::Receiver<Command>,
    active_subscriptions: Vec<SubscribeParams>,
    pending_messages: Vec<ClientMessage>,
    reconnect_attempts: u32,
    ready_state: Arc<AtomicU16>,
}

impl TaskState {
    fn emit(&self, event: WsEvent) {
        let _ = self.event_tx.try_send(event);
    }

    fn should_reconnect(&self) -> bool {
        self.config.reconnect && self.reconnect_attempts < self.config.max_reconnect_attempts
    }
}

// ─── Public WsClient ─────────────────────────────────────────────────────────

/// WebSocket client for one backend namespace.
///
/// A background tokio task manages the connection; the public API communicates
/// with it via mpsc channels.
pub struct WsClient {
    config: WsConfig,
    cmd_tx: Option<mpsc::Sender<Command>>,
    event_rx: tokio::sync::Mutex<mpsc::Receiver<WsEvent>>,
    event_tx: mpsc::Sender<WsEvent>,
    task_handle: Option<JoinHandle<()>>,
    ready_state: Arc<AtomicU16>,
}

impl WsClient {
    /// Create a new WS client. Does not connect yet.
    pub fn new(config: WsConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(256);
        Self {
            config,
            cmd_tx: None,
            event_rx: tokio::sync::Mutex::new(event_rx),
            event_tx,
            task_handle: None,
            ready_state: Arc::new(AtomicU16::new(ReadyState::Closed as u16)),
        }
    }

    /// Connect to the WebSocket server.
    ///
    /// Spawns the background task that manages the connection, reconnection,
    /// and subscription tracking. Messages sent before the socket is up are
    /// delivered once it opens.
    pub async fn connect(&mut self) -> Result<(), WsError> {
        if self.cmd_tx.is_some() {
            return Ok(());
        }

        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        self.cmd_tx = Some(cmd_tx);
        self.ready_state
            .store(ReadyState::Connecting as u16, Ordering::SeqCst);

        let state = TaskState {
            config: self.config.clone(),
            event_tx: self.event_tx.clone(),
            cmd_rx,
            active_subscriptions: Vec::new(),
            pending_messages: Vec::new(),
            reconnect_attempts: 0,
            ready_state: Arc::clone(&self.ready_state),
        };

        let handle = tokio::spawn(run_task(state));
        self.task_handle = Some(handle);

        Ok(())
    }

    /// Disconnect from the WebSocket server.
    ///
    /// Sends a graceful close to the background task and waits for it to
    /// finish (bounded).
    pub async fn disconnect(&mut self) -> Result<(), WsError> {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(Command::Disconnect).await;
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }

        self.ready_state
            .store(ReadyState::Closed as u16, Ordering::SeqCst);
        Ok(())
    }

    /// Send a message to the server.
    ///
    /// Returns `WsError::NotConnected` if `connect()` has not been called.
    pub fn send(&self, msg: ClientMessage) -> Result<(), WsError> {
        match &self.cmd_tx {
            Some(tx) => tx.try_send(Command::Send(msg)).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    WsError::SendFailed("Command channel full".into())
                }
                mpsc::error::TrySendError::Closed(_) => WsError::NotConnected,
            }),
            None => Err(WsError::NotConnected),
        }
    }

    /// Subscribe to a feed.
    pub fn subscribe(&self, params: SubscribeParams) -> Result<(), WsError> {
        self.send(params.to_subscribe_message())
    }

    /// Unsubscribe from a feed.
    pub fn unsubscribe(&self, params: &SubscribeParams) -> Result<(), WsError> {
        self.send(params.to_unsubscribe_message())
    }

    /// Whether the WebSocket is currently open.
    pub fn is_connected(&self) -> bool {
        self.ready_state() == ReadyState::Open
    }

    /// Current connection state.
    pub fn ready_state(&self) -> ReadyState {
        ReadyState::from(self.ready_state.load(Ordering::SeqCst))
    }

    /// Get a stream of events from the WebSocket connection.
    ///
    /// The returned stream borrows `self`, so it must be dropped before
    /// calling `disconnect()`.
    pub fn events(&self) -> Pin<Box<dyn Stream<Item = WsEvent> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            &self.event_rx,
            |rx| async move {
                let mut guard = rx.lock().await;
                guard.recv().await.map(|event| (event, rx))
            },
        ))
    }

}

impl Drop for WsClient {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_task(mut state: TaskState) {
    loop {
        // ── 1. Attempt connection ────────────────────────────────────────
        let (sink, stream) = match attempt_connect(&state.config.url).await {
            Ok(parts) => parts,
            Err(e) => {
                tracing::error!("WebSocket connection failed: {}", e);
                state.emit(WsEvent::Error(format!("Connection failed: {}", e)));

                if state.should_reconnect() {
                    backoff_sleep(&mut state, false).await;
                    if drain_commands_to_pending(&mut state) {
                        return;
                    }
                    continue;
                } else {
                    state.emit(WsEvent::MaxReconnectReached);
                    return;
                }
            }
        };

        // ── 2. Connected ─────────────────────────────────────────────────
        state.reconnect_attempts = 0;
        state
            .ready_state
            .store(ReadyState::Open as u16, Ordering::SeqCst);
        state.emit(WsEvent::Connected);

        // ── 3. Flush pending messages and resubscribe ────────────────────
        let mut sink = sink;
        flush_pending(&mut sink, &mut state.pending_messages).await;
        resubscribe_all(&mut sink, &state.active_subscriptions).await;

        // ── 4. Inner select! loop ────────────────────────────────────────
        let reason = run_connected(&mut state, sink, stream).await;

        // ── 5. Post-disconnect decision ──────────────────────────────────
        state
            .ready_state
            .store(ReadyState::Closed as u16, Ordering::SeqCst);

        match reason {
            DisconnectReason::UserRequested | DisconnectReason::NormalClose => return,
            DisconnectReason::RateLimited => {
                if state.should_reconnect() {
                    state
                        .ready_state
                        .store(ReadyState::Connecting as u16, Ordering::SeqCst);
                    backoff_sleep(&mut state, true).await;
                    if drain_commands_to_pending(&mut state) {
                        return;
                    }
                    continue;
                }
                state.emit(WsEvent::MaxReconnectReached);
                return;
            }
            DisconnectReason::Error(_) => {
                if state.should_reconnect() {
                    state
                        .ready_state
                        .store(ReadyState::Connecting as u16, Ordering::SeqCst);
                    backoff_sleep(&mut state, false).await;
                    if drain_commands_to_pending(&mut state) {
                        return;
                    }
                    continue;
                }
                state.emit(WsEvent::MaxReconnectReached);
                return;
            }
        }
    }
}

/// The inner connected loop — runs until the connection breaks.
async fn run_connected(
    state: &mut TaskState,
    mut sink: SplitSink<WsStream, Message>,
    mut stream: SplitStream<WsStream>,
) -> DisconnectReason {
    loop {
        tokio::select! {
            // ── a) Incoming WS message ───────────────────────────────────
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let text_str: &str = text.as_ref();
                        match serde_json::from_str::<ServerMessage>(text_str) {
                            Ok(server_msg) => {
                                state.emit(WsEvent::Message(server_msg));
                            }
                            Err(e) => {
                                tracing::warn!(
                                    "WS deserialization error: {} — raw: {}",
                                    e,
                                    text_str
                                );
                                state.emit(WsEvent::Error(format!(
                                    "Deserialization error: {}",
                                    e
                                )));
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = extract_close(frame.as_ref());
                        state.emit(WsEvent::Disconnected {
                            code: Some(code),
                            reason: reason.clone(),
                        });
                        return match code {
                            1000 => DisconnectReason::NormalClose,
                            1008 => DisconnectReason::RateLimited,
                            _ => DisconnectReason::Error(reason),
                        };
                    }
                    Some(Ok(_)) => {} // Binary, Frame — ignore
                    Some(Err(e)) => {
                        let reason = e.to_string();
                        tracing::error!("WebSocket error: {}", reason);
                        state.emit(WsEvent::Disconnected {
                            code: None,
                            reason: reason.clone(),
                        });
                        return DisconnectReason::Error(reason);
                    }
                    None => {
                        state.emit(WsEvent::Disconnected {
                            code: None,
                            reason: "Stream ended".into(),
                        });
                        return DisconnectReason::Error("Stream ended".into());
                    }
                }
            }

            // ── b) Command from public API ───────────────────────────────
            cmd = state.cmd_rx.recv() => {
                match cmd {
                    Some(Command::Send(client_msg)) => {
                        track_subscription(&mut state.active_subscriptions, &client_msg);
                        if let Err(e) = send_msg(&mut sink, &client_msg).await {
                            tracing::warn!("Send failed: {}", e);
                        }
                    }
                    Some(Command::Disconnect) => {
                        let _ = sink.send(Message::Close(Some(CloseFrame {
                            code: CloseCode::Normal,
                            reason: "Client disconnect".into(),
                        }))).await;
                        return DisconnectReason::UserRequested;
                    }
                    None => {
                        // WsClient dropped — clean exit
                        return DisconnectReason::UserRequested;
                    }
                }
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Attempt to establish a WebSocket connection with a 30-second timeout.
async fn attempt_connect(
    url: &str,
) -> Result<(SplitSink<WsStream, Message>, SplitStream<WsStream>), String> {
    let (ws_stream, _) = tokio::time::timeout(Duration::from_secs(30), connect_async(url))
        .await
        .map_err(|_| "Connection timeout".to_string())?
        .map_err(|e| e.to_string())?;

    Ok(ws_stream.split())
}

/// Serialize and send a ClientMessage over the sink.
async fn send_msg(
    sink: &mut SplitSink<WsStream, Message>,
    msg: &ClientMessage,
) -> Result<(), String> {
    let json = serde_json::to_string(msg).map_err(|e| e.to_string())?;
    sink.send(Message::Text(json.into()))
        .await
        .map_err(|e| e.to_string())
}

/// Extract close code and reason from an optional CloseFrame.
fn extract_close(frame: Option<&CloseFrame>) -> (u16, String) {
    match frame {
        Some(f) => (f.code.into(), f.reason.to_string()),
        None => (1006, "No close frame".into()),
    }
}

// ─── Subscription tracking ───────────────────────────────────────────────────

fn track_subscription(subs: &mut Vec<SubscribeParams>, msg: &ClientMessage) {
    if let Some(params) = msg.as_subscribe() {
        if !subs.contains(&params) {
            tracing::debug!("Tracking subscription: {}", params.subscription_key());
            subs.push(params);
        }
        return;
    }

    if let Some(unsub) = msg.as_unsubscribe() {
        let before = subs.len();
        subs.retain(|s| !s.matches_unsubscribe(&unsub));
        let removed = before - subs.len();
        if removed > 0 {
            tracing::debug!("Removed {} subscription(s) from tracking", removed);
        }
    }
}

async fn resubscribe_all(sink: &mut SplitSink<WsStream, Message>, subs: &[SubscribeParams]) {
    if subs.is_empty() {
        return;
    }
    tracing::info!("Resubscribing to {} tracked subscription(s)", subs.len());
    for sub in subs {
        if let Err(e) = send_msg(sink, &sub.to_subscribe_message()).await {
            tracing::warn!("Failed to resubscribe: {}", e);
        }
    }
}

// ─── Message queue ───────────────────────────────────────────────────────────

async fn flush_pending(
    sink: &mut SplitSink<WsStream, Message>,
    pending: &mut Vec<ClientMessage>,
) {
    if pending.is_empty() {
        return;
    }
    tracing::info!("Flushing {} pending message(s)", pending.len());
    let messages = std::mem::take(pending);
    for msg in &messages {
        if let Err(e) = send_msg(sink, msg).await {
            tracing::warn!("Failed to flush pending message: {}", e);
        }
    }
}

/// Drain commands that arrived during backoff into `pending_messages`.
/// Returns `true` when a disconnect was requested.
fn drain_commands_to_pending(state: &mut TaskState) -> bool {
    while let Ok(cmd) = state.cmd_rx.try_recv() {
        match cmd {
            Command::Send(msg) => {
                track_subscription(&mut state.active_subscriptions, &msg);
                state.pending_messages.push(msg);
            }
            Command::Disconnect => {
                return true;
            }
        }
    }
    false
}

// ─── Reconnection backoff ────────────────────────────────────────────────────

async fn backoff_sleep(state: &mut TaskState, rate_limited: bool) {
    state.reconnect_attempts += 1;

    let exp = (state.reconnect_attempts - 1).min(10);
    let base = state
        .config
        .base_reconnect_delay_ms
        .saturating_mul(1u32 << exp);

    let (jitter_max, cap) = if rate_limited {
        (1000u32, 300_000u32) // up to 5 minutes for rate limits
    } else {
        (500u32, 60_000u32) // up to 60 seconds normally
    };

    let jitter = rand::random::<u32>() % jitter_max;
    let delay = base.saturating_add(jitter).min(cap);

    tracing::info!(
        "Reconnect attempt {}/{} in {}ms{}",
        state.reconnect_attempts,
        state.config.max_reconnect_attempts,
        delay,
        if rate_limited { " (rate-limited)" } else { "" }
    );

    tokio::time::sleep(Duration::from_millis(delay as u64)).await;
}

// ─── Tests ───────────────────────────────────────────────────────────────────
