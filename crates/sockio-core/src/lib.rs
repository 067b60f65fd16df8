//! sockio core: packet model and frame codec for the legacy Socket.IO wire protocol.
//!
//! This crate turns typed packets into the `type:id:endpoint:payload` strings a
//! transport sends, and parses server text (single packets or multiplexed
//! frames) back into packets. It carries no transport or runtime dependencies
//! so it can sit under any WebSocket or polling client.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed server input surfaces as `SockioError` values next to the packets
//! that did decode, never as a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorCode, Result, SockioError};
pub use protocol::{
    decode, encode, encode_frame, frame_wrap, Codec, CodecLimits, Decoded, GroupError, JsonData,
    Packet, PacketBody, PacketId, PacketType, FRAME_DELIMITER,
};
