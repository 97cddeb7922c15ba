//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (business-logic-ready)
//! - `wire.rs` — Raw serde structs matching backend responses
//! - `state.rs` — State containers with update methods (for live data)
//! - `client.rs` — Sub-client with HTTP methods and caching

pub mod chart;
pub mod history;
pub mod master;
pub mod token;
