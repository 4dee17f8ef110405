//! # OBSIDIAN Shared
//!
//! Common types used by the protocol and world crates.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - Networking or async runtimes
//! - Locks or channels
//!
//! It holds plain values only. Anything with behavior belongs in
//! `obsidian_protocol` or `obsidian_world`.

pub mod constants;
pub mod item;
pub mod math;

pub use constants::{CHUNK_SHIFT, CHUNK_SIZE, DEFAULT_VIEW_RADIUS, MAX_PACKET_SIZE, TICK_RATE};
pub use item::{ItemId, ItemStack};
pub use math::{chunk_coord, Aabb, Rotation, Vec3};
