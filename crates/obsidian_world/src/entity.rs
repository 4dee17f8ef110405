//! # Entity Model
//!
//! Entities are the simulated objects of one level: anything with a
//! position, rotation, and motion that advances once per tick.
//!
//! ## Design
//!
//! An entity is a plain struct with a capability tag ([`EntityKind`]), not a
//! trait-object hierarchy. Per-kind behavior is an explicit match on the
//! tag. Shared handles ([`EntityRef`]) give the registry, queries, and the
//! broadcaster a consistent view of the same entity without copying state.

use crate::session::Session;
use obsidian_shared::{ItemStack, Rotation, Vec3};
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Unique identifier for an entity.
///
/// Process-unique within one registry: allocated monotonically, never
/// reused. Id 0 is never allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an entity id from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an entity's tick asks the registry to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickAction {
    /// Keep the entity alive.
    Continue,
    /// Remove the entity from the live set this tick.
    Despawn,
}

/// Unexpected failure from an entity's own advancement logic.
///
/// A tick error never aborts the registry tick; the failing entity is
/// logged and queued for removal while the rest of the population advances.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickError {
    /// Position or motion stopped being a finite number.
    #[error("entity {entity_id} state is no longer finite after integration")]
    NonFiniteState {
        /// The entity whose state went bad.
        entity_id: EntityId,
    },
}

/// Capability tag distinguishing entity variants.
#[derive(Clone)]
pub enum EntityKind {
    /// Plain world object with no attached behavior.
    Generic,
    /// Dropped item stack waiting to be picked up.
    Item {
        /// The stack on the ground.
        stack: ItemStack,
    },
    /// Player entity owning a live network session.
    Player {
        /// The player's session, owned by the transport layer.
        session: Arc<dyn Session>,
    },
}

impl fmt::Debug for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => write!(f, "Generic"),
            Self::Item { stack } => f.debug_struct("Item").field("stack", stack).finish(),
            Self::Player { .. } => write!(f, "Player"),
        }
    }
}

/// One live entity of a level.
///
/// State changes flow through the mutators so the stale flag always tracks
/// "observable state changed since the last broadcast".
#[derive(Debug)]
pub struct Entity {
    /// Registry-allocated identity.
    id: EntityId,
    /// World position.
    position: Vec3,
    /// Body rotation.
    rotation: Rotation,
    /// Motion applied each tick.
    motion: Vec3,
    /// Observable state changed since the last broadcast.
    stale: bool,
    /// Terminal removal flag.
    removed: bool,
    /// Capability tag.
    kind: EntityKind,
}

impl Entity {
    /// Creates a new entity at a position.
    ///
    /// New entities start stale so their initial state is broadcast on the
    /// first tick they are observed.
    #[must_use]
    pub const fn new(id: EntityId, position: Vec3, kind: EntityKind) -> Self {
        Self {
            id,
            position,
            rotation: Rotation::ZERO,
            motion: Vec3::ZERO,
            stale: true,
            removed: false,
            kind,
        }
    }

    /// Returns the entity's id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns the current rotation.
    #[inline]
    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Returns the current motion vector.
    #[inline]
    #[must_use]
    pub const fn motion(&self) -> Vec3 {
        self.motion
    }

    /// Returns the capability tag.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// True for player-kind entities.
    #[inline]
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player { .. })
    }

    /// The network session, for player entities.
    #[must_use]
    pub fn session(&self) -> Option<Arc<dyn Session>> {
        match &self.kind {
            EntityKind::Player { session } => Some(Arc::clone(session)),
            _ => None,
        }
    }

    /// Moves the entity and marks it stale.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.stale = true;
    }

    /// Rotates the entity and marks it stale.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.stale = true;
    }

    /// Changes the motion vector and marks it stale.
    pub fn set_motion(&mut self, motion: Vec3) {
        self.motion = motion;
        self.stale = true;
    }

    /// Whether state changed since the last broadcast.
    #[inline]
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.stale
    }

    /// Clears the stale flag after a broadcast.
    #[inline]
    pub fn reset_stale(&mut self) {
        self.stale = false;
    }

    /// Whether the entity has been removed (terminal).
    #[inline]
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    /// The removal hook. Marks the entity removed; terminal.
    ///
    /// Callers guard with [`is_removed`](Self::is_removed) so the hook runs
    /// exactly once per entity.
    pub fn remove(&mut self) {
        self.removed = true;
        tracing::debug!(entity_id = %self.id, "entity removed");
    }

    /// Advances the entity by one tick.
    ///
    /// Integrates motion into position and reports whether the entity wants
    /// to stay alive. Player entities despawn when their session closes;
    /// that path is driven by the session's own disconnect handling, the
    /// tick just reconciles it.
    pub fn tick(&mut self) -> Result<TickAction, TickError> {
        if self.removed {
            return Ok(TickAction::Despawn);
        }

        if let EntityKind::Player { session } = &self.kind {
            if !session.is_open() {
                return Ok(TickAction::Despawn);
            }
        }

        if self.motion != Vec3::ZERO {
            self.position = self.position + self.motion;
            self.stale = true;
        }

        if !self.position.is_finite() || !self.motion.is_finite() {
            return Err(TickError::NonFiniteState { entity_id: self.id });
        }

        Ok(TickAction::Continue)
    }
}

/// Shared handle to one live entity.
///
/// Cheap to clone; the registry's backing collection, query results, and
/// broadcaster calls all hand around the same handle. Identity is the
/// handle itself, not the id: see [`same_entity`](Self::same_entity).
#[derive(Clone)]
pub struct EntityRef {
    /// Copy of the immutable id, readable without locking.
    id: EntityId,
    /// The shared entity state.
    entity: Arc<Mutex<Entity>>,
}

impl EntityRef {
    /// Wraps an entity into a shared handle.
    #[must_use]
    pub fn new(entity: Entity) -> Self {
        Self {
            id: entity.id(),
            entity: Arc::new(Mutex::new(entity)),
        }
    }

    /// The entity's id, without taking the lock.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Locks the entity for reading or mutation.
    ///
    /// Never call while holding the registry lock.
    #[must_use]
    pub fn lock(&self) -> MutexGuard<'_, Entity> {
        self.entity.lock()
    }

    /// Current position (brief lock).
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.entity.lock().position()
    }

    /// Whether the entity is removed (brief lock).
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.entity.lock().is_removed()
    }

    /// Whether this is a player entity (brief lock).
    #[must_use]
    pub fn is_player(&self) -> bool {
        self.entity.lock().is_player()
    }

    /// True if both handles point at the same entity.
    #[must_use]
    pub fn same_entity(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entity, &other.entity)
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityRef").field(&self.id).finish()
    }
}
