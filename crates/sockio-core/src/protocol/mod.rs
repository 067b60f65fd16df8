//! Protocol modules (packet model + frame codec).
//!
//! - `packet`: typed packets, one body variant per kind.
//! - `encode` / `decode`: single packet text form `type:id[+]:endpoint:payload`.
//! - `frame`: multiplexed `\u{FFFD}<len>\u{FFFD}<packet>` groups.
//! - `codec`: entry points tying the above together under `CodecLimits`.
//!
//! All parsers are panic-free: malformed input is reported as `SockioError`
//! next to whatever did decode.

pub mod codec;
mod decode;
pub mod encode;
pub mod frame;
pub mod limits;
pub mod packet;

pub use codec::{decode, encode, encode_frame, Codec, Decoded, GroupError};
pub use frame::{frame_wrap, FRAME_DELIMITER};
pub use limits::CodecLimits;
pub use packet::{JsonData, Packet, PacketBody, PacketId, PacketType};
