//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw format the backend sends, so they can be used
//! directly in wire types without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── TokenAddress ────────────────────────────────────────────────────────────

/// Newtype for on-chain token mint addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenAddress(String);

impl TokenAddress {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TokenAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for TokenAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TokenAddress(s.to_string()))
    }
}

impl Serialize for TokenAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(TokenAddress(s))
    }
}

// ─── WalletAddress ───────────────────────────────────────────────────────────

/// A user wallet address stored as an opaque string.
///
/// Serializes transparently as a JSON string. Can be used as a HashMap key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for WalletAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(WalletAddress(s))
    }
}

// ─── TxKind ──────────────────────────────────────────────────────────────────

/// Transaction direction: Buy or Sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Buy,
    Sell,
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TxKind::Buy => write!(f, "Buy"),
            TxKind::Sell => write!(f, "Sell"),
        }
    }
}

// ─── Timeframe ───────────────────────────────────────────────────────────────

/// Chart candle timeframe.
///
/// The charting widget speaks in resolution codes (`"1"`, `"5"`, `"60"`,
/// `"240"`, `"1D"`, ...); the REST API and the WebSocket each want their own
/// spelling. This enum is the single source of truth for all three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1s")]
    Sec1,
    #[serde(rename = "5s")]
    Sec5,
    #[serde(rename = "15s")]
    Sec15,
    #[default]
    #[serde(rename = "1m")]
    Min1,
    #[serde(rename = "5m")]
    Min5,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1w")]
    Week1,
    #[serde(rename = "1mn")]
    Month1,
}

/// Widget resolution codes accepted by the datafeed, in display order.
pub const SUPPORTED_RESOLUTIONS: [&str; 10] =
    ["1s", "5s", "15s", "1", "5", "1h", "4h", "1D", "1W", "1MN"];

impl Timeframe {
    /// Parse a charting-widget resolution code.
    ///
    /// The widget sends bare minute counts for intraday resolutions
    /// (`"1"` → 1m, `"5"` → 5m, `"60"` → 1h, `"240"` → 4h); everything else
    /// passes through by name.
    pub fn from_widget(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Min1),
            "5" => Some(Self::Min5),
            "60" => Some(Self::Hour1),
            "240" => Some(Self::Hour4),
            "1s" => Some(Self::Sec1),
            "5s" => Some(Self::Sec5),
            "15s" => Some(Self::Sec15),
            "1h" => Some(Self::Hour1),
            "4h" => Some(Self::Hour4),
            "1D" => Some(Self::Day1),
            "1W" => Some(Self::Week1),
            "1MN" => Some(Self::Month1),
            _ => None,
        }
    }

    /// The REST `type=` query parameter.
    pub fn api_type(&self) -> &'static str {
        match self {
            Self::Sec1 => "1s",
            Self::Sec5 => "5s",
            Self::Sec15 => "15s",
            Self::Min1 => "1m",
            Self::Min5 => "5m",
            Self::Hour1 => "1h",
            Self::Hour4 => "4h",
            Self::Day1 => "1D",
            Self::Week1 => "1W",
            Self::Month1 => "1MN",
        }
    }

    /// The lowercase `timeframe` field of WebSocket subscribe messages.
    pub fn socket_timeframe(&self) -> &'static str {
        match self {
            Self::Sec1 => "1s",
            Self::Sec5 => "5s",
            Self::Sec15 => "15s",
            Self::Min1 => "1m",
            Self::Min5 => "5m",
            Self::Hour1 => "1h",
            Self::Hour4 => "4h",
            Self::Day1 => "1d",
            Self::Week1 => "1w",
            Self::Month1 => "1mn",
        }
    }

    /// Duration of one candle in seconds.
    pub fn seconds(&self) -> u64 {
        match self {
            Self::Sec1 => 1,
            Self::Sec5 => 5,
            Self::Sec15 => 15,
            Self::Min1 => 60,
            Self::Min5 => 300,
            Self::Hour1 => 3600,
            Self::Hour4 => 14400,
            Self::Day1 => 86400,
            Self::Week1 => 604800,
            Self::Month1 => 2592000,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.socket_timeframe())
    }
}
