//! # armorywatch
//!
//! A scheduled poller for the Battle.net armory API. Each cycle it fetches
//! profile, equipment, achievement, PvP, raid, and Mythic+ resources for
//! every tracked character (plus realm status for every tracked realm),
//! normalizes the responses into flat per-entity metric records, and
//! publishes the result as a [`Snapshot`](armorywatch_types::Snapshot).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                           Poller                               │
//! │  ┌──────────┐   ┌───────────────────┐   ┌──────────────────┐  │
//! │  │  config  │──▶│    coordinator    │──▶│ Snapshot         │  │
//! │  │          │   │ (per-cycle fetch  │   │  watch channel   │  │
//! │  └──────────┘   │  + merge)         │   │  + outputs       │  │
//! │                 └─────────┬─────────┘   └──────────────────┘  │
//! │                           │                                    │
//! │                           ▼                                    │
//! │                 ┌───────────────────┐   ┌──────────────────┐  │
//! │                 │      extract      │◀──│ armorywatch-     │  │
//! │                 │ (pure doc→metric) │   │ client (gateway) │  │
//! │                 └───────────────────┘   └──────────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`config`]**: Runtime configuration loaded from file + environment
//! - **[`extract`]**: Pure extractors from raw API documents to typed
//!   metric groups with explicit zero defaults
//! - **[`coordinator`]**: The poll cycle - sequential per-entity fan-out,
//!   merge, snapshot assembly, interval-driven loop
//! - **[`output`]**: File and channel destinations for snapshots
//!
//! Fetch failures never fail a cycle: the gateway collapses them into
//! empty documents, and extractors turn those into zero-valued metrics.
//! Only a rejected credential exchange fails the cycle, in which case the
//! previous snapshot is republished with its success flag cleared.

pub mod config;
pub mod coordinator;
pub mod extract;
pub mod output;

// Re-export main types for convenience
pub use config::PollerConfig;
pub use coordinator::{Poller, PollerHandle};
pub use output::Output;

pub use armorywatch_client::{ArmoryClient, Bracket, ClientError, Payload, Region};
pub use armorywatch_types::{Features, MetricRecord, MetricValue, Snapshot, TrackedCharacter};
