//! # OBSIDIAN Protocol
//!
//! The binary wire format of the OBSIDIAN server core.
//!
//! ## Architecture
//!
//! - **Cursors**: [`PacketReader`]/[`PacketWriter`] - position-tracked byte
//!   cursors shared across a whole outer protocol message
//! - **Primitives**: little-endian fixed-width values, LEB128 varints with a
//!   zig-zag signed variant, and composite layouts (vector, rotation, item
//!   stack) defined once and reused everywhere
//! - **Packets**: each type owns its layout via [`PacketCodec`]; the
//!   [`Packet`] envelope dispatches on a one-byte id
//!
//! ## Contract
//!
//! `decode(encode(p)) == p` for every packet type and all valid field
//! values, and an encode's byte length is a deterministic function of the
//! field values. Malformed input surfaces a [`ProtocolError`]; it never
//! panics and never corrupts state belonging to other sessions.

pub mod codec;
pub mod error;
pub mod packets;
mod types;

pub use codec::{PacketReader, PacketWriter};
pub use error::{ProtocolError, ProtocolResult};
pub use packets::{
    AddItem, EntityMotion, MoveEntity, MovePlayer, Packet, PacketCodec, PacketId, RemoveEntity,
    SetEntityMotion,
};
