//! Network URL constants for the MemePump SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.memepump.gg";

/// Default WebSocket base URL. Channel paths (`/chart`, `/token-txs`) are
/// appended to this.
pub const DEFAULT_WS_URL: &str = "wss://ws.memepump.gg";
