//! # World & Protocol Constants
//!
//! Fixed values shared between the simulation core and the wire protocol.
//!
//! **CRITICAL:** The chunk geometry and packet ceiling are baked into the
//! wire format. Changes require a protocol version bump.

// =============================================================================
// WORLD GEOMETRY
// =============================================================================

/// Horizontal chunk edge length in world units.
pub const CHUNK_SIZE: i32 = 16;

/// Arithmetic shift equivalent of dividing by [`CHUNK_SIZE`].
pub const CHUNK_SHIFT: u32 = 4;

// =============================================================================
// SIMULATION
// =============================================================================

/// Simulation tick rate (ticks per second).
pub const TICK_RATE: u32 = 20;

/// Tick duration in milliseconds (20 Hz = 50 ms).
pub const TICK_DURATION_MILLIS: u64 = 1_000 / TICK_RATE as u64;

/// Default radius (world units) inside which a player observes entities.
pub const DEFAULT_VIEW_RADIUS: f32 = 64.0;

// =============================================================================
// PROTOCOL
// =============================================================================

/// Maximum encoded packet size (MTU-safe ceiling for the framing layer).
pub const MAX_PACKET_SIZE: usize = 1200;
