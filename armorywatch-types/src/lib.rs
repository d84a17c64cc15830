//! # armorywatch-types
//!
//! Core types for armory metrics polling. This crate defines the schema
//! shared between the API client, the poll coordinator, and anything that
//! consumes snapshots (display bindings, file exports, channels).
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature as needed
//! - **Flat records**: Every entity is a plain name→scalar mapping, rebuilt
//!   from scratch each poll cycle
//! - **Ergonomic builders**: Fluent API for constructing snapshots
//!
//! ## Example
//!
//! ```rust
//! use armorywatch_types::{MetricRecord, Snapshot};
//!
//! let mut record = MetricRecord::new();
//! record.set("character_level", 80);
//! record.set("guild_name", "Brewmasters");
//!
//! let snapshot = Snapshot::builder()
//!     .timestamp_ms(1703160000000)
//!     .character("thrall-durotan", record)
//!     .build();
//!
//! assert_eq!(snapshot.character_count(), 1);
//! assert!(snapshot.success);
//! ```

mod record;
mod snapshot;
mod tracking;

pub use record::*;
pub use snapshot::*;
pub use tracking::*;
