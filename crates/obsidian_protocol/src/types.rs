//! # Composite Wire Primitives
//!
//! Typed reads and writes layered on the byte cursors. Each layout is
//! defined exactly once here and reused by every packet that carries the
//! type.

use crate::codec::{PacketReader, PacketWriter};
use crate::error::{ProtocolError, ProtocolResult};
use obsidian_shared::{ItemStack, Rotation, Vec3};

impl PacketReader<'_> {
    /// Reads a 3-component vector as three consecutive f32.
    pub fn read_vec3(&mut self) -> ProtocolResult<Vec3> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    /// Reads a pitch/yaw rotation; head yaw follows the body yaw.
    pub fn read_rotation(&mut self) -> ProtocolResult<Rotation> {
        let pitch = self.read_f32()?;
        let yaw = self.read_f32()?;
        Ok(Rotation::body(pitch, yaw))
    }

    /// Reads a full body rotation (pitch, yaw, head yaw).
    pub fn read_body_rotation(&mut self) -> ProtocolResult<Rotation> {
        Ok(Rotation::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Reads an item stack descriptor.
    ///
    /// A non-positive item id is the empty stack and terminates the record;
    /// otherwise count, damage, and a length-prefixed metadata blob follow.
    #[allow(clippy::cast_sign_loss)]
    pub fn read_item_stack(&mut self) -> ProtocolResult<ItemStack> {
        let item_id = self.read_i16()?;
        if item_id <= 0 {
            return Ok(ItemStack::empty());
        }

        let count = self.read_u8()?;
        if count == 0 {
            return Err(ProtocolError::InvalidItemStack { item_id, count });
        }
        let damage = self.read_i16()?;
        let metadata_len = usize::from(self.read_u16()?);
        let metadata = self.read_bytes(metadata_len)?.to_vec();

        Ok(ItemStack {
            item_id: item_id as u16,
            count,
            damage,
            metadata,
        })
    }
}

impl PacketWriter {
    /// Writes a 3-component vector as three consecutive f32.
    pub fn write_vec3(&mut self, value: Vec3) {
        self.write_f32(value.x);
        self.write_f32(value.y);
        self.write_f32(value.z);
    }

    /// Writes a pitch/yaw rotation.
    pub fn write_rotation(&mut self, value: Rotation) {
        self.write_f32(value.pitch);
        self.write_f32(value.yaw);
    }

    /// Writes a full body rotation (pitch, yaw, head yaw).
    pub fn write_body_rotation(&mut self, value: Rotation) {
        self.write_f32(value.pitch);
        self.write_f32(value.yaw);
        self.write_f32(value.head_yaw);
    }

    /// Writes an item stack descriptor.
    ///
    /// Wire item ids are 15-bit; ids above `i16::MAX` are not representable.
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn write_item_stack(&mut self, stack: &ItemStack) {
        if stack.is_empty() {
            self.write_i16(0);
            return;
        }
        debug_assert!(stack.item_id <= i16::MAX as u16, "item id exceeds wire range");
        debug_assert!(stack.metadata.len() <= usize::from(u16::MAX));

        self.write_i16(stack.item_id as i16);
        self.write_u8(stack.count);
        self.write_i16(stack.damage);
        self.write_u16(stack.metadata.len() as u16);
        self.write_bytes(&stack.metadata);
    }
}
