//! Item stack value type.
//!
//! This is the descriptor that travels on the wire inside item-carrying
//! packets. Inventory behavior lives with world logic, not here.

use serde::{Deserialize, Serialize};

/// Unique identifier for an item type.
///
/// Identifier 0 is reserved for "no item".
pub type ItemId = u16;

/// A stack of items.
///
/// The wire layout treats a non-positive item id as the empty stack, so an
/// empty stack encodes to a single sentinel and carries no count, damage,
/// or metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// The item type ID, or 0 for the empty stack.
    pub item_id: ItemId,
    /// Number of items in this stack.
    pub count: u8,
    /// Durability damage / auxiliary value.
    pub damage: i16,
    /// Opaque auxiliary metadata blob (enchantments, display name, ...).
    pub metadata: Vec<u8>,
}

impl ItemStack {
    /// Creates an empty item stack.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            item_id: 0,
            count: 0,
            damage: 0,
            metadata: Vec::new(),
        }
    }

    /// Creates a new item stack with no metadata.
    #[inline]
    #[must_use]
    pub const fn new(item_id: ItemId, count: u8, damage: i16) -> Self {
        Self {
            item_id,
            count,
            damage,
            metadata: Vec::new(),
        }
    }

    /// Returns true if this stack holds nothing.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_id == 0 || self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stack() {
        assert!(ItemStack::empty().is_empty());
        assert!(ItemStack::new(0, 12, 0).is_empty());
        assert!(ItemStack::new(5, 0, 0).is_empty());
        assert!(!ItemStack::new(5, 1, 0).is_empty());
    }
}
