//! # Viewer Broadcast Seam
//!
//! The registry hands finished packets to a [`ViewerBroadcaster`]; delivery
//! to the sessions currently viewing the source entity is the transport
//! layer's job.
//!
//! ## Design
//!
//! The tick thread must never block on I/O, so the shipped implementation
//! is a bounded lock-free channel: enqueue with `try_send`, and when the
//! session layer falls behind, drop and count rather than stall the tick.

use crate::entity::{EntityId, EntityRef};
use crossbeam_channel::{bounded, Receiver, Sender};
use obsidian_protocol::Packet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Delivers packets to every session currently viewing a source entity.
///
/// `queue_packet_for_viewers` must not block the calling (tick) thread, and
/// per viewer the delivery order must preserve the order packets were
/// queued within one tick.
pub trait ViewerBroadcaster: Send + Sync {
    /// Asynchronously enqueues a packet for the viewers of `source`.
    fn queue_packet_for_viewers(&self, source: &EntityRef, packet: Packet);
}

/// A packet queued for the viewers of one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerPacket {
    /// The entity whose viewers should receive the packet.
    pub source: EntityId,
    /// The packet to deliver.
    pub packet: Packet,
}

/// Bounded-channel broadcaster.
///
/// The session layer drains the receiving side and fans each packet out to
/// the sessions viewing the source entity. A full queue drops the packet
/// and counts it; the next stale broadcast re-sends current state anyway.
pub struct ChannelBroadcaster {
    /// Queue into the session layer.
    sender: Sender<ViewerPacket>,
    /// Drain side, cloneable for the session layer.
    receiver: Receiver<ViewerPacket>,
    /// Packets dropped because the queue was full.
    dropped: AtomicU64,
}

impl ChannelBroadcaster {
    /// Creates a broadcaster with a bounded queue.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            dropped: AtomicU64::new(0),
        }
    }

    /// Returns a drain handle for the session layer.
    #[must_use]
    pub fn receiver(&self) -> Receiver<ViewerPacket> {
        self.receiver.clone()
    }

    /// Number of packets dropped on a full queue.
    #[inline]
    #[must_use]
    pub fn dropped_packets(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl ViewerBroadcaster for ChannelBroadcaster {
    fn queue_packet_for_viewers(&self, source: &EntityRef, packet: Packet) {
        let envelope = ViewerPacket {
            source: source.id(),
            packet,
        };
        if self.sender.try_send(envelope).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(source = %source.id(), "viewer queue full, packet dropped");
        }
    }
}

/// Broadcaster that discards everything. For tests and benchmarks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBroadcaster;

impl ViewerBroadcaster for NullBroadcaster {
    fn queue_packet_for_viewers(&self, _source: &EntityRef, _packet: Packet) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntityKind};
    use obsidian_protocol::{RemoveEntity, SetEntityMotion};
    use obsidian_shared::Vec3;

    fn test_entity(id: u64) -> EntityRef {
        EntityRef::new(Entity::new(EntityId::new(id), Vec3::ZERO, EntityKind::Generic))
    }

    #[test]
    fn test_queue_preserves_order() {
        let broadcaster = ChannelBroadcaster::new(16);
        let entity = test_entity(3);

        broadcaster
            .queue_packet_for_viewers(&entity, Packet::RemoveEntity(RemoveEntity { entity_id: 3 }));
        broadcaster.queue_packet_for_viewers(
            &entity,
            Packet::SetEntityMotion(SetEntityMotion::default()),
        );

        let rx = broadcaster.receiver();
        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.source, EntityId::new(3));
        assert!(matches!(first.packet, Packet::RemoveEntity(_)));
        assert!(matches!(second.packet, Packet::SetEntityMotion(_)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let broadcaster = ChannelBroadcaster::new(1);
        let entity = test_entity(1);

        let packet = Packet::RemoveEntity(RemoveEntity { entity_id: 1 });
        broadcaster.queue_packet_for_viewers(&entity, packet.clone());
        broadcaster.queue_packet_for_viewers(&entity, packet);

        assert_eq!(broadcaster.dropped_packets(), 1);
        assert_eq!(broadcaster.receiver().len(), 1);
    }
}
