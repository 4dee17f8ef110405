//! # OBSIDIAN World
//!
//! The concurrent entity registry at the heart of the OBSIDIAN server core.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      ENTITY REGISTRY                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐      │
//! │  │ I/O Threads  │   │ Tick Thread  │   │ Broadcaster  │      │
//! │  │ register /   │──▶│ snapshot ▶   │──▶│ (Lock-Free   │      │
//! │  │ unregister   │   │ advance ▶    │   │  Queue)      │      │
//! │  └──────────────┘   │ broadcast    │   └──────────────┘      │
//! │                     └──────────────┘                         │
//! │               ┌───────────▼───────────┐                      │
//! │               │ Live Set (Mutex<Vec>) │                      │
//! │               └───────────────────────┘                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - Queries never observe an entity marked removed (at the moment of the
//!   check; removal can race after the query returns)
//! - Entity ids are unique and strictly increasing per allocation
//! - One misbehaving entity degrades to "despawned"; everything else keeps
//!   ticking
//! - The tick thread never blocks on network I/O

pub mod broadcast;
pub mod config;
pub mod entity;
pub mod registry;
pub mod session;

pub use broadcast::{ChannelBroadcaster, NullBroadcaster, ViewerBroadcaster, ViewerPacket};
pub use config::WorldConfig;
pub use entity::{Entity, EntityId, EntityKind, EntityRef, TickAction, TickError};
pub use registry::EntityRegistry;
pub use session::Session;
