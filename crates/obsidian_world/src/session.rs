//! # Session Seam
//!
//! The registry's view of a player's network session. The transport layer
//! owns the real session; the registry only ever asks these two questions.

/// A live network session attached to a player entity.
///
/// Implemented by the transport/session layer. Both methods are called from
/// the tick thread and must not block.
pub trait Session: Send + Sync {
    /// Whether the connection is still open.
    fn is_open(&self) -> bool;

    /// Recomputes the set of entities this session can observe.
    ///
    /// Called after registry membership changes. Recomputation is global,
    /// not incremental: the session re-derives its visible set from the
    /// registry queries it already has access to.
    fn update_viewable_entities(&self);
}
