//! # Packet Definitions
//!
//! The concrete packet family and the envelope that frames it.
//!
//! Every packet type implements [`PacketCodec`]: it declares its fields and
//! encodes/decodes them strictly in declaration order. Adding a packet type
//! means adding a struct, an id, and one match arm in the envelope - no
//! shared code changes.
//!
//! Two entity-id encodings coexist on purpose. Item/spawn-style packets
//! carry a fixed 64-bit id; movement packets carry a zig-zag varint
//! truncated to 32 bits. This asymmetry is wire compatibility and must
//! round-trip bit for bit.

use crate::codec::{PacketReader, PacketWriter};
use crate::error::{ProtocolError, ProtocolResult};
use obsidian_shared::{ItemStack, Rotation, Vec3};

/// Packet type identifier.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketId {
    /// Server spawns a dropped item entity.
    AddItem = 0,
    /// Server removes an entity.
    RemoveEntity = 1,
    /// Player movement (either direction).
    MovePlayer = 2,
    /// Server moves a non-player entity.
    MoveEntity = 3,
    /// Server sets motion vectors for a batch of entities.
    SetEntityMotion = 4,
}

impl PacketId {
    /// Looks up a packet id from its wire byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::AddItem),
            1 => Some(Self::RemoveEntity),
            2 => Some(Self::MovePlayer),
            3 => Some(Self::MoveEntity),
            4 => Some(Self::SetEntityMotion),
            _ => None,
        }
    }
}

/// The packet capability: a self-contained decode/encode pair.
///
/// `decode` must consume exactly the bytes the corresponding `encode`
/// produced, in the same order, with no implicit padding. `encode` is a
/// pure function of the packet's field values.
pub trait PacketCodec: Sized {
    /// Wire id of this packet type.
    const ID: PacketId;

    /// Populates a packet by consuming the buffer in field order.
    fn decode(reader: &mut PacketReader<'_>) -> ProtocolResult<Self>;

    /// Appends the packet's fields to the buffer in field order.
    fn encode(&self, writer: &mut PacketWriter);
}

/// Spawns a dropped item entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddItem {
    /// Entity id (fixed 64-bit on the wire - legacy layout).
    pub entity_id: u64,
    /// The dropped stack.
    pub stack: ItemStack,
    /// Spawn position.
    pub position: Vec3,
    /// Initial velocity.
    pub velocity: Vec3,
}

impl PacketCodec for AddItem {
    const ID: PacketId = PacketId::AddItem;

    fn decode(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            entity_id: reader.read_u64()?,
            stack: reader.read_item_stack()?,
            position: reader.read_vec3()?,
            velocity: reader.read_vec3()?,
        })
    }

    fn encode(&self, writer: &mut PacketWriter) {
        writer.write_u64(self.entity_id);
        writer.write_item_stack(&self.stack);
        writer.write_vec3(self.position);
        writer.write_vec3(self.velocity);
    }
}

/// Removes an entity from the client's world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RemoveEntity {
    /// Entity id (fixed 64-bit on the wire).
    pub entity_id: u64,
}

impl PacketCodec for RemoveEntity {
    const ID: PacketId = PacketId::RemoveEntity;

    fn decode(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            entity_id: reader.read_u64()?,
        })
    }

    fn encode(&self, writer: &mut PacketWriter) {
        writer.write_u64(self.entity_id);
    }
}

/// Player movement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovePlayer {
    /// Entity id (zig-zag varint, truncated to 32 bits on the wire).
    pub entity_id: i64,
    /// New position.
    pub position: Vec3,
    /// Look rotation (pitch/yaw on the wire; head yaw follows the body).
    pub rotation: Rotation,
    /// Movement mode flag (normal move vs. teleport).
    pub mode: bool,
    /// Whether the player is standing on ground.
    pub on_ground: bool,
}

impl PacketCodec for MovePlayer {
    const ID: PacketId = PacketId::MovePlayer;

    fn decode(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            entity_id: i64::from(reader.read_signed_varint()?),
            position: reader.read_vec3()?,
            rotation: reader.read_rotation()?,
            mode: reader.read_bool()?,
            on_ground: reader.read_bool()?,
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode(&self, writer: &mut PacketWriter) {
        writer.write_signed_varint(self.entity_id as i32);
        writer.write_vec3(self.position);
        writer.write_rotation(self.rotation);
        writer.write_bool(self.mode);
        writer.write_bool(self.on_ground);
    }
}

/// Moves a non-player entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveEntity {
    /// Entity id (zig-zag varint, truncated to 32 bits on the wire).
    pub entity_id: i64,
    /// New position.
    pub position: Vec3,
    /// Full body rotation (pitch, yaw, head yaw).
    pub rotation: Rotation,
}

impl PacketCodec for MoveEntity {
    const ID: PacketId = PacketId::MoveEntity;

    fn decode(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        Ok(Self {
            entity_id: i64::from(reader.read_signed_varint()?),
            position: reader.read_vec3()?,
            rotation: reader.read_body_rotation()?,
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode(&self, writer: &mut PacketWriter) {
        writer.write_signed_varint(self.entity_id as i32);
        writer.write_vec3(self.position);
        writer.write_body_rotation(self.rotation);
    }
}

/// One motion record inside [`SetEntityMotion`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EntityMotion {
    /// Entity id (zig-zag varint, truncated to 32 bits on the wire).
    pub entity_id: i64,
    /// New motion vector.
    pub motion: Vec3,
}

/// Sets motion vectors for a batch of entities.
///
/// Encodes an unsigned varint record count followed by that many
/// fixed-layout records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetEntityMotion {
    /// Motion records, in broadcast order.
    pub motions: Vec<EntityMotion>,
}

impl PacketCodec for SetEntityMotion {
    const ID: PacketId = PacketId::SetEntityMotion;

    fn decode(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        let count = reader.read_unsigned_varint()? as usize;
        let mut motions = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            motions.push(EntityMotion {
                entity_id: i64::from(reader.read_signed_varint()?),
                motion: reader.read_vec3()?,
            });
        }
        Ok(Self { motions })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode(&self, writer: &mut PacketWriter) {
        writer.write_unsigned_varint(self.motions.len() as u32);
        for record in &self.motions {
            writer.write_signed_varint(record.entity_id as i32);
            writer.write_vec3(record.motion);
        }
    }
}

/// One protocol message of any known type.
#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    /// See [`AddItem`].
    AddItem(AddItem),
    /// See [`RemoveEntity`].
    RemoveEntity(RemoveEntity),
    /// See [`MovePlayer`].
    MovePlayer(MovePlayer),
    /// See [`MoveEntity`].
    MoveEntity(MoveEntity),
    /// See [`SetEntityMotion`].
    SetEntityMotion(SetEntityMotion),
}

impl Packet {
    /// Returns the wire id of this packet.
    #[must_use]
    pub const fn id(&self) -> PacketId {
        match self {
            Self::AddItem(_) => PacketId::AddItem,
            Self::RemoveEntity(_) => PacketId::RemoveEntity,
            Self::MovePlayer(_) => PacketId::MovePlayer,
            Self::MoveEntity(_) => PacketId::MoveEntity,
            Self::SetEntityMotion(_) => PacketId::SetEntityMotion,
        }
    }

    /// Encodes the id byte and packet body onto the writer.
    pub fn encode(&self, writer: &mut PacketWriter) {
        writer.write_u8(self.id() as u8);
        match self {
            Self::AddItem(p) => p.encode(writer),
            Self::RemoveEntity(p) => p.encode(writer),
            Self::MovePlayer(p) => p.encode(writer),
            Self::MoveEntity(p) => p.encode(writer),
            Self::SetEntityMotion(p) => p.encode(writer),
        }
    }

    /// Encodes into a fresh buffer.
    #[must_use]
    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut writer = PacketWriter::new();
        self.encode(&mut writer);
        writer.into_inner()
    }

    /// Decodes exactly one packet from the cursor.
    ///
    /// The cursor may hold further packets of the outer message; they are
    /// left unconsumed.
    pub fn decode(reader: &mut PacketReader<'_>) -> ProtocolResult<Self> {
        let id_byte = reader.read_u8()?;
        let Some(id) = PacketId::from_u8(id_byte) else {
            return Err(ProtocolError::UnknownPacketId(id_byte));
        };
        Ok(match id {
            PacketId::AddItem => Self::AddItem(AddItem::decode(reader)?),
            PacketId::RemoveEntity => Self::RemoveEntity(RemoveEntity::decode(reader)?),
            PacketId::MovePlayer => Self::MovePlayer(MovePlayer::decode(reader)?),
            PacketId::MoveEntity => Self::MoveEntity(MoveEntity::decode(reader)?),
            PacketId::SetEntityMotion => Self::SetEntityMotion(SetEntityMotion::decode(reader)?),
        })
    }

    /// Decodes a frame that must hold exactly one packet.
    pub fn decode_exact(buffer: &[u8]) -> ProtocolResult<Self> {
        let mut reader = PacketReader::new(buffer);
        let packet = Self::decode(&mut reader)?;
        if reader.remaining() > 0 {
            return Err(ProtocolError::TrailingBytes {
                remaining: reader.remaining(),
            });
        }
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(packet: &Packet) -> Packet {
        Packet::decode_exact(&packet.encode_to_vec()).expect("roundtrip decode")
    }

    #[test]
    fn test_move_player_roundtrip() {
        let packet = Packet::MovePlayer(MovePlayer {
            entity_id: 5,
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Rotation::body(0.0, 90.0),
            mode: false,
            on_ground: true,
        });
        assert_eq!(roundtrip(&packet), packet);
    }

    #[test]
    fn test_move_player_deterministic_length() {
        let packet = Packet::MovePlayer(MovePlayer {
            entity_id: 5,
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Rotation::body(0.0, 90.0),
            mode: false,
            on_ground: true,
        });
        // id byte + 1-byte varint + 12 position + 8 rotation + 2 flags
        assert_eq!(packet.encode_to_vec().len(), 24);
        assert_eq!(packet.encode_to_vec(), packet.encode_to_vec());
    }

    #[test]
    fn test_add_item_roundtrip() {
        let packet = Packet::AddItem(AddItem {
            entity_id: u64::MAX - 7,
            stack: ItemStack {
                item_id: 310,
                count: 64,
                damage: -3,
                metadata: vec![1, 2, 3, 4],
            },
            position: Vec3::new(-8.0, 70.5, 12.25),
            velocity: Vec3::new(0.0, -0.1, 0.0),
        });
        assert_eq!(roundtrip(&packet), packet);
    }

    #[test]
    fn test_add_item_entity_id_is_fixed_width() {
        // The legacy layout spends 8 bytes on the id even for id 1.
        let packet = Packet::AddItem(AddItem {
            entity_id: 1,
            stack: ItemStack::empty(),
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
        });
        // id byte + 8 entity id + 2 empty-stack sentinel + 12 + 12
        assert_eq!(packet.encode_to_vec().len(), 35);
    }

    #[test]
    fn test_move_entity_roundtrip() {
        let packet = Packet::MoveEntity(MoveEntity {
            entity_id: -42,
            position: Vec3::new(100.0, 64.0, -100.0),
            rotation: Rotation::new(5.0, 270.0, 265.0),
        });
        assert_eq!(roundtrip(&packet), packet);
    }

    #[test]
    fn test_set_entity_motion_batch_roundtrip() {
        let packet = Packet::SetEntityMotion(SetEntityMotion {
            motions: vec![
                EntityMotion {
                    entity_id: 1,
                    motion: Vec3::new(0.1, 0.0, -0.1),
                },
                EntityMotion {
                    entity_id: 2,
                    motion: Vec3::ZERO,
                },
                EntityMotion {
                    entity_id: 300,
                    motion: Vec3::new(-2.0, 1.0, 0.5),
                },
            ],
        });
        assert_eq!(roundtrip(&packet), packet);
    }

    #[test]
    fn test_empty_motion_batch() {
        let packet = Packet::SetEntityMotion(SetEntityMotion::default());
        assert_eq!(packet.encode_to_vec().len(), 2); // id byte + zero count
        assert_eq!(roundtrip(&packet), packet);
    }

    #[test]
    fn test_remove_entity_roundtrip() {
        let packet = Packet::RemoveEntity(RemoveEntity { entity_id: 77 });
        assert_eq!(packet.encode_to_vec().len(), 9);
        assert_eq!(roundtrip(&packet), packet);
    }

    #[test]
    fn test_unknown_packet_id() {
        let err = Packet::decode_exact(&[0xEE]).unwrap_err();
        assert_eq!(err, ProtocolError::UnknownPacketId(0xEE));
    }

    #[test]
    fn test_truncated_packet_reports_eof() {
        let packet = Packet::MovePlayer(MovePlayer {
            entity_id: 5,
            ..Default::default()
        });
        let buf = packet.encode_to_vec();
        let err = Packet::decode_exact(&buf[..buf.len() - 1]).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut buf = Packet::RemoveEntity(RemoveEntity { entity_id: 1 }).encode_to_vec();
        buf.push(0x00);
        let err = Packet::decode_exact(&buf).unwrap_err();
        assert_eq!(err, ProtocolError::TrailingBytes { remaining: 1 });
    }

    #[test]
    fn test_two_packets_share_one_cursor() {
        let mut writer = PacketWriter::new();
        Packet::RemoveEntity(RemoveEntity { entity_id: 9 }).encode(&mut writer);
        Packet::MovePlayer(MovePlayer {
            entity_id: 9,
            on_ground: true,
            ..Default::default()
        })
        .encode(&mut writer);

        let buf = writer.into_inner();
        let mut reader = PacketReader::new(&buf);
        let first = Packet::decode(&mut reader).unwrap();
        let second = Packet::decode(&mut reader).unwrap();
        assert_eq!(first.id(), PacketId::RemoveEntity);
        assert_eq!(second.id(), PacketId::MovePlayer);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_movement_id_truncates_to_32_bits() {
        // Documented legacy quirk: movement ids wider than 32 bits are lossy.
        let packet = Packet::MoveEntity(MoveEntity {
            entity_id: (1_i64 << 33) | 7,
            ..Default::default()
        });
        let Packet::MoveEntity(decoded) = roundtrip(&packet) else {
            panic!("wrong packet type");
        };
        assert_eq!(decoded.entity_id, 7);
    }
}
