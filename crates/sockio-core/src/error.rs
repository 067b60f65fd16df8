//! Shared error type across sockio crates.

use thiserror::Error;

use crate::protocol::packet::PacketType;

/// Stable error codes (reported by tools and asserted by test vectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Packet built with fields outside its kind's contract.
    InvalidPacketFields,
    /// Type segment is not one of the nine packet kinds.
    UnknownPacketType,
    /// Multiplex framing is broken (bad length header, stray text, limits).
    FrameDecode,
    /// JSON payload did not parse.
    PayloadParse,
    /// Envelope segments are structurally invalid (non-numeric id, missing ack id).
    MalformedPacket,
    /// Configuration rejected.
    InvalidConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Internal failure.
    Internal,
}

impl ErrorCode {
    /// String representation used in tool output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidPacketFields => "INVALID_PACKET_FIELDS",
            ErrorCode::UnknownPacketType => "UNKNOWN_PACKET_TYPE",
            ErrorCode::FrameDecode => "FRAME_DECODE",
            ErrorCode::PayloadParse => "PAYLOAD_PARSE",
            ErrorCode::MalformedPacket => "MALFORMED_PACKET",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SockioError>;

/// Unified error type used by the codec and the tools.
#[derive(Debug, Error)]
pub enum SockioError {
    #[error("invalid packet fields: {0}")]
    InvalidPacketFields(String),
    #[error("unknown packet type: {0:?}")]
    UnknownPacketType(String),
    #[error("frame decode error: {0}")]
    FrameDecode(String),
    #[error("{kind} payload parse error: {reason}")]
    PayloadParse { kind: PacketType, reason: String },
    #[error("malformed packet: {0}")]
    MalformedPacket(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl SockioError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            SockioError::InvalidPacketFields(_) => ErrorCode::InvalidPacketFields,
            SockioError::UnknownPacketType(_) => ErrorCode::UnknownPacketType,
            SockioError::FrameDecode(_) => ErrorCode::FrameDecode,
            SockioError::PayloadParse { .. } => ErrorCode::PayloadParse,
            SockioError::MalformedPacket(_) => ErrorCode::MalformedPacket,
            SockioError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            SockioError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            SockioError::Internal(_) => ErrorCode::Internal,
        }
    }
}
