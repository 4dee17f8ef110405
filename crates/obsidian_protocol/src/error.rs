//! # Protocol Error Types
//!
//! All errors that can occur while encoding or decoding the wire format.
//!
//! A malformed buffer is a session-fatal condition for the connection that
//! produced it; the owning session layer is expected to terminate that
//! connection. Nothing here is allowed to panic or to corrupt state shared
//! with other sessions.

use thiserror::Error;

/// Errors that can occur in the packet codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The buffer ended before the requested field could be read.
    #[error("unexpected end of buffer: needed {requested} more bytes, {available} available")]
    UnexpectedEof {
        /// Bytes the read needed.
        requested: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// A variable-length integer ran past its maximum encoded width.
    #[error("variable-length integer exceeds {max_bytes} bytes")]
    VarintTooLong {
        /// Maximum encoded width for this varint type.
        max_bytes: usize,
    },

    /// The packet id byte does not name a known packet type.
    #[error("unknown packet id: {0:#04x}")]
    UnknownPacketId(u8),

    /// An item stack record contradicts itself.
    #[error("invalid item stack: id {item_id} with count {count}")]
    InvalidItemStack {
        /// Decoded item id.
        item_id: i16,
        /// Decoded stack count.
        count: u8,
    },

    /// A frame that must hold exactly one packet had bytes left over.
    #[error("{remaining} trailing bytes after packet body")]
    TrailingBytes {
        /// Bytes left unconsumed.
        remaining: usize,
    },
}

/// Result type for codec operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
