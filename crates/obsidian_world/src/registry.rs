//! # Entity Registry
//!
//! Authoritative entity tracking for one level. Safe for concurrent use:
//! network I/O threads register and unregister entities at any time while a
//! single scheduler drives [`EntityRegistry::on_tick`] at a fixed cadence.
//!
//! ## Lock discipline
//!
//! The registry lock guards only the backing vector and is held only around
//! collection operations. The tick snapshots the vector once, releases the
//! lock, and does all per-entity work (advancement, packet construction,
//! broadcaster hand-off) on the snapshot, so slow entities never block
//! concurrent registration. Entity locks are never taken while the registry
//! lock is held.

use crate::broadcast::ViewerBroadcaster;
use crate::entity::{Entity, EntityId, EntityKind, EntityRef, TickAction};
use obsidian_protocol::{EntityMotion, MoveEntity, Packet, SetEntityMotion};
use obsidian_shared::{Aabb, Vec3};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// The entity registry of one level.
pub struct EntityRegistry {
    /// Backing collection of live entities.
    entities: Mutex<Vec<EntityRef>>,
    /// Monotonic id source; first allocated id is 1.
    id_allocator: AtomicU64,
    /// Set when an entity was registered since the last tick checked.
    entities_added: AtomicBool,
    /// Where stale-entity packets go.
    broadcaster: Arc<dyn ViewerBroadcaster>,
}

impl EntityRegistry {
    /// Creates a registry that broadcasts through the given seam.
    #[must_use]
    pub fn new(broadcaster: Arc<dyn ViewerBroadcaster>) -> Self {
        Self {
            entities: Mutex::new(Vec::new()),
            id_allocator: AtomicU64::new(0),
            entities_added: AtomicBool::new(false),
            broadcaster,
        }
    }

    /// Allocates a strictly increasing, never-reused entity id.
    ///
    /// A single atomic increment: safe from any thread, never blocks on
    /// registry mutation.
    #[must_use]
    pub fn allocate_entity_id(&self) -> EntityId {
        EntityId::new(self.id_allocator.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Adds an entity to the live set.
    ///
    /// The entity's id must already be allocated. Registering the same
    /// handle twice is ignored: at most one copy of a given entity
    /// reference is ever present.
    pub fn register(&self, entity: EntityRef) {
        {
            let mut entities = self.entities.lock();
            if entities.iter().any(|e| e.same_entity(&entity)) {
                tracing::warn!(entity_id = %entity.id(), "entity already registered");
                return;
            }
            entities.push(entity);
        }
        self.entities_added.store(true, Ordering::Release);
    }

    /// Allocates an id, registers, and returns the new entity's handle.
    #[must_use]
    pub fn spawn(&self, position: Vec3, kind: EntityKind) -> EntityRef {
        let entity = EntityRef::new(Entity::new(self.allocate_entity_id(), position, kind));
        self.register(entity.clone());
        entity
    }

    /// Removes an entity from the live set immediately.
    ///
    /// Out-of-band removal (explicit disconnects). Does not run the
    /// entity's removal hook.
    pub fn unregister(&self, entity: &EntityRef) {
        self.entities.lock().retain(|e| !e.same_entity(entity));
    }

    /// Advances every live entity by one tick.
    ///
    /// Intended to be invoked by exactly one scheduler at a fixed cadence;
    /// not reentrant. A single entity's failure never aborts the tick for
    /// the others.
    pub fn on_tick(&self) {
        // 1. Snapshot so the rest of the tick neither blocks registration
        //    nor is corrupted by it.
        let snapshot: Vec<EntityRef> = self.entities.lock().clone();

        let mut to_remove: Vec<EntityRef> = Vec::new();
        for entity_ref in &snapshot {
            let mut entity = entity_ref.lock();

            // 2. Advance; despawn requests and failures both queue removal.
            match entity.tick() {
                Ok(TickAction::Despawn) => {
                    to_remove.push(entity_ref.clone());
                    continue;
                }
                Err(error) => {
                    tracing::error!(entity_id = %entity.id(), %error, "unable to tick entity");
                    to_remove.push(entity_ref.clone());
                    continue;
                }
                Ok(TickAction::Continue) => {}
            }

            // 3. Broadcast changed state, then clear the stale flag.
            if entity.is_stale() {
                #[allow(clippy::cast_possible_wrap)]
                let wire_id = entity.id().raw() as i64;
                let move_packet = Packet::MoveEntity(MoveEntity {
                    entity_id: wire_id,
                    position: entity.position(),
                    rotation: entity.rotation(),
                });
                let motion_packet = Packet::SetEntityMotion(SetEntityMotion {
                    motions: vec![EntityMotion {
                        entity_id: wire_id,
                        motion: entity.motion(),
                    }],
                });
                entity.reset_stale();
                drop(entity);

                self.broadcaster.queue_packet_for_viewers(entity_ref, move_packet);
                self.broadcaster.queue_packet_for_viewers(entity_ref, motion_packet);
            }
        }

        // 4. Apply all removals in one batch.
        if !to_remove.is_empty() {
            let mut entities = self.entities.lock();
            entities.retain(|e| !to_remove.iter().any(|r| r.same_entity(e)));
        }

        // 5. Run removal hooks exactly once. Players are skipped: their
        //    session teardown already handled removal.
        for entity_ref in &to_remove {
            let mut entity = entity_ref.lock();
            if entity.is_player() {
                continue;
            }
            if !entity.is_removed() {
                entity.remove();
            }
        }

        // 6. Membership changed: every connected player re-derives what it
        //    can see. Global, not incremental.
        if self.entities_added.swap(false, Ordering::AcqRel) || !to_remove.is_empty() {
            for player in self.players() {
                let session = player.lock().session();
                if let Some(session) = session {
                    session.update_viewable_entities();
                }
            }
        }
    }

    /// Player entities whose network session exists and is open.
    #[must_use]
    pub fn players(&self) -> Vec<EntityRef> {
        let snapshot: Vec<EntityRef> = self.entities.lock().clone();
        snapshot
            .into_iter()
            .filter(|entity_ref| {
                let entity = entity_ref.lock();
                entity.session().is_some_and(|session| session.is_open())
            })
            .collect()
    }

    /// Non-removed entities whose position falls in the given chunk.
    #[must_use]
    pub fn entities_in_chunk(&self, x: i32, z: i32) -> Vec<EntityRef> {
        let snapshot: Vec<EntityRef> = self.entities.lock().clone();
        snapshot
            .into_iter()
            .filter(|entity_ref| {
                let entity = entity_ref.lock();
                let position = entity.position();
                !entity.is_removed() && position.chunk_x() == x && position.chunk_z() == z
            })
            .collect()
    }

    /// Non-removed entities within Euclidean distance of an origin.
    #[must_use]
    pub fn entities_in_distance(&self, origin: Vec3, distance: f32) -> Vec<EntityRef> {
        let snapshot: Vec<EntityRef> = self.entities.lock().clone();
        snapshot
            .into_iter()
            .filter(|entity_ref| {
                let entity = entity_ref.lock();
                !entity.is_removed() && entity.position().distance(origin) <= distance
            })
            .collect()
    }

    /// Non-removed entities whose position lies inside the box.
    #[must_use]
    pub fn entities_in_bounds(&self, bounds: &Aabb) -> Vec<EntityRef> {
        let snapshot: Vec<EntityRef> = self.entities.lock().clone();
        snapshot
            .into_iter()
            .filter(|entity_ref| {
                let entity = entity_ref.lock();
                !entity.is_removed() && bounds.contains(entity.position())
            })
            .collect()
    }

    /// Finds a non-removed entity by id. Absence is not an error.
    #[must_use]
    pub fn find_entity_by_id(&self, id: EntityId) -> Option<EntityRef> {
        let snapshot: Vec<EntityRef> = self.entities.lock().clone();
        snapshot
            .into_iter()
            .find(|entity_ref| entity_ref.id() == id && !entity_ref.is_removed())
    }

    /// Defensive copy of the live set.
    #[must_use]
    pub fn all_entities(&self) -> Vec<EntityRef> {
        self.entities.lock().clone()
    }

    /// Number of entities in the live set (including not-yet-reaped removed
    /// entities awaiting the next tick).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.lock().len()
    }

    /// True if the live set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.lock().is_empty()
    }
}
