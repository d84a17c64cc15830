//! # armorywatch-client
//!
//! Authenticated client for the Battle.net data API, built for best-effort
//! metrics polling rather than general API coverage.
//!
//! The client is deliberately forgiving: a resource that is missing,
//! throttled past its one retry, or unreachable comes back as
//! [`Payload::Empty`] instead of an error, because every downstream metric
//! has a defined zero value. The only hard failure is a rejected credential
//! exchange.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use armorywatch_client::{ArmoryClient, Region};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ArmoryClient::builder()
//!         .region(Region::Eu)
//!         .credentials("client-id", "client-secret")
//!         .build();
//!
//!     client.validate_connection().await?;
//!
//!     let equipment = client.character_equipment("Twisting Nether", "Grommash").await?;
//!     if let Some(items) = equipment.get("equipped_items") {
//!         println!("equipped items: {}", items.as_array().map_or(0, |a| a.len()));
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod fetch;
mod gateway;
mod realm;
mod region;
mod token;

pub use error::ClientError;
pub use fetch::Bracket;
pub use gateway::{ArmoryClient, ArmoryClientBuilder, Payload};
pub use realm::realm_slug;
pub use region::{Namespace, Region};
pub use token::TokenManager;
