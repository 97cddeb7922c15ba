//! Subscription types, tracking, and matching.

use crate::shared::{Timeframe, TokenAddress};
use crate::ws::ClientMessage;

/// Parameters for subscribing to a WS channel.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum SubscribeParams {
    Chart {
        token_address: TokenAddress,
        timeframe: Timeframe,
    },
    TokenTxs {
        token_address: TokenAddress,
    },
}

/// Parameters for unsubscribing from a WS channel.
///
/// Chart unsubscribes carry only the token address — the backend drops every
/// timeframe stream for that token at once.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum UnsubscribeParams {
    Chart { token_address: TokenAddress },
    TokenTxs { token_address: TokenAddress },
}

/// Trait for subscription types that can be tracked and matched.
pub trait Subscription {
    fn to_subscribe_message(&self) -> ClientMessage;
    fn to_unsubscribe_message(&self) -> ClientMessage;
    fn matches_unsubscribe(&self, unsub: &UnsubscribeParams) -> bool;
    fn subscription_key(&self) -> String;
}

impl Subscription for SubscribeParams {
    fn to_subscribe_message(&self) -> ClientMessage {
        match self {
            SubscribeParams::Chart {
                token_address,
                timeframe,
            } => ClientMessage::SubscribeToChart {
                token_address: token_address.clone(),
                timeframe: *timeframe,
            },
            SubscribeParams::TokenTxs { token_address } => ClientMessage::Subscribe {
                token_address: token_address.clone(),
            },
        }
    }

    fn to_unsubscribe_message(&self) -> ClientMessage {
        match self {
            SubscribeParams::Chart { token_address, .. } => {
                ClientMessage::UnsubscribeFromChart {
                    token_address: token_address.clone(),
                }
            }
            SubscribeParams::TokenTxs { token_address } => ClientMessage::Unsubscribe {
                token_address: token_address.clone(),
            },
        }
    }

    fn matches_unsubscribe(&self, unsub: &UnsubscribeParams) -> bool {
        match (self, unsub) {
            (
                SubscribeParams::Chart {
                    token_address: sub_token,
                    ..
                },
                UnsubscribeParams::Chart {
                    token_address: unsub_token,
                },
            ) => sub_token == unsub_token,
            (
                SubscribeParams::TokenTxs {
                    token_address: sub_token,
                },
                UnsubscribeParams::TokenTxs {
                    token_address: unsub_token,
                },
            ) => sub_token == unsub_token,
            _ => false,
        }
    }

    fn subscription_key(&self) -> String {
        match self {
            SubscribeParams::Chart {
                token_address,
                timeframe,
            } => format!("chart:{}:{}", token_address, timeframe),
            SubscribeParams::TokenTxs { token_address } => {
                format!("txs:{}", token_address)
            }
        }
    }
}

impl ClientMessage {
    /// The subscription this message opens, if any.
    pub(crate) fn as_subscribe(&self) -> Option<SubscribeParams> {
        match self {
            ClientMessage::SubscribeToChart {
                token_address,
                timeframe,
            } => Some(SubscribeParams::Chart {
                token_address: token_address.clone(),
                timeframe: *timeframe,
            }),
            ClientMessage::Subscribe { token_address } => Some(SubscribeParams::TokenTxs {
                token_address: token_address.clone(),
            }),
            _ => None,
        }
    }

    /// The subscription this message closes, if any.
    pub(crate) fn as_unsubscribe(&self) -> Option<UnsubscribeParams> {
        match self {
            ClientMessage::UnsubscribeFromChart { token_address } => {
                Some(UnsubscribeParams::Chart {
                    token_address: token_address.clone(),
                })
            }
            ClientMessage::Unsubscribe { token_address } => Some(UnsubscribeParams::TokenTxs {
                token_address: token_address.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_sub(token: &str, timeframe: Timeframe) -> SubscribeParams {
        SubscribeParams::Chart {
            token_address: TokenAddress::from(token),
            timeframe,
        }
    }

    #[test]
    fn test_chart_unsubscribe_matches_any_timeframe() {
        let sub = chart_sub("tok1", Timeframe::Min5);
        let unsub = UnsubscribeParams::Chart {
            token_address: TokenAddress::from("tok1"),
        };
        assert!(sub.matches_unsubscribe(&unsub));

        let other = UnsubscribeParams::Chart {
            token_address: TokenAddress::from("tok2"),
        };
        assert!(!sub.matches_unsubscribe(&other));
    }

    #[test]
    fn test_cross_channel_no_match() {
        let sub = chart_sub("tok1", Timeframe::Min1);
        let unsub = UnsubscribeParams::TokenTxs {
            token_address: TokenAddress::from("tok1"),
        };
        assert!(!sub.matches_unsubscribe(&unsub));
    }

    #[test]
    fn test_subscribe_message_round_trip() {
        let sub = chart_sub("tok1", Timeframe::Hour4);
        let msg = sub.to_subscribe_message();
        assert_eq!(msg.as_subscribe(), Some(sub.clone()));

        let unsub_msg = sub.to_unsubscribe_message();
        let unsub = unsub_msg.as_unsubscribe().unwrap();
        assert!(sub.matches_unsubscribe(&unsub));
    }

    #[test]
    fn test_subscription_keys() {
        assert_eq!(
            chart_sub("tok1", Timeframe::Min5).subscription_key(),
            "chart:tok1:5m"
        );
        let txs = SubscribeParams::TokenTxs {
            token_address: TokenAddress::from("tok1"),
        };
        assert_eq!(txs.subscription_key(), "txs:tok1");
    }
}
