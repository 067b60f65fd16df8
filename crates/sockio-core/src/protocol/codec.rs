//! Frame codec entry points.
//!
//! `Codec` is stateless apart from its limits: encode and decode are pure
//! transformations and can be called concurrently from any number of tasks.

use crate::error::{Result, SockioError};
use crate::protocol::decode::parse_packet;
use crate::protocol::encode::encode_packet;
use crate::protocol::frame::{frame_wrap, is_multiplexed, split_groups, Group};
use crate::protocol::limits::CodecLimits;
use crate::protocol::packet::Packet;

/// Decode failure for one group of a frame.
#[derive(Debug)]
pub struct GroupError {
    /// Position of the group within the frame (0 for a single-packet frame).
    pub index: usize,
    /// Text of the failed group, kept for the application to inspect.
    pub raw: String,
    pub error: SockioError,
}

/// Result of decoding one frame: packets in arrival order plus per-group errors.
///
/// A packet degraded by a bad JSON payload appears in `packets` (with its
/// parse-failed marker set) and its `PayloadParse` error appears in `errors`.
#[derive(Debug, Default)]
pub struct Decoded {
    pub packets: Vec<Packet>,
    pub errors: Vec<GroupError>,
}

impl Decoded {
    /// True when every group decoded without error.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn push_error(&mut self, index: usize, raw: &str, error: SockioError) {
        tracing::warn!(index, code = error.code().as_str(), %error, "frame group rejected");
        self.errors.push(GroupError {
            index,
            raw: raw.to_owned(),
            error,
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct Codec {
    limits: CodecLimits,
}

impl Codec {
    pub fn new(limits: CodecLimits) -> Result<Self> {
        limits.validate()?;
        Ok(Self { limits })
    }

    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// Encode one packet.
    pub fn encode(&self, packet: &Packet) -> Result<String> {
        encode_packet(packet)
    }

    /// Encode several packets for one transport send. A single packet is sent
    /// bare; two or more are wrapped as multiplex groups.
    pub fn encode_frame(&self, packets: &[Packet]) -> Result<String> {
        match packets {
            [] => Err(SockioError::InvalidPacketFields(
                "cannot frame an empty packet list".into(),
            )),
            [single] => self.encode(single),
            many => {
                if many.len() > self.limits.max_groups {
                    return Err(SockioError::InvalidPacketFields(format!(
                        "frame of {} packets exceeds {} groups",
                        many.len(),
                        self.limits.max_groups
                    )));
                }
                let mut out = String::new();
                for packet in many {
                    out.push_str(&frame_wrap(&self.encode(packet)?));
                }
                Ok(out)
            }
        }
    }

    /// Decode a frame (single packet or multiplexed).
    ///
    /// Never fails as a whole: broken groups are reported in `Decoded::errors`
    /// and decoding continues with the next group.
    pub fn decode(&self, frame: &str) -> Decoded {
        let mut out = Decoded::default();

        let chars = frame.chars().count();
        if chars > self.limits.max_frame_chars {
            out.push_error(
                0,
                frame,
                SockioError::FrameDecode(format!(
                    "frame of {chars} characters exceeds {}",
                    self.limits.max_frame_chars
                )),
            );
            return out;
        }

        if !is_multiplexed(frame) {
            decode_group(&mut out, 0, frame);
            tracing::debug!(
                packets = out.packets.len(),
                errors = out.errors.len(),
                "decoded single-packet frame"
            );
            return out;
        }

        for (index, group) in split_groups(frame, self.limits.max_groups)
            .into_iter()
            .enumerate()
        {
            match group {
                Group::Packet(text) => decode_group(&mut out, index, text),
                Group::Broken { raw, error } => out.push_error(index, raw, error),
            }
        }
        tracing::debug!(
            packets = out.packets.len(),
            errors = out.errors.len(),
            "decoded multiplexed frame"
        );
        out
    }
}

fn decode_group(out: &mut Decoded, index: usize, text: &str) {
    match parse_packet(text) {
        Ok(parsed) => {
            if let Some(error) = parsed.degraded {
                out.push_error(index, text, error);
            }
            out.packets.push(parsed.packet);
        }
        Err(error) => out.push_error(index, text, error),
    }
}

/// Encode one packet with default limits.
pub fn encode(packet: &Packet) -> Result<String> {
    Codec::default().encode(packet)
}

/// Encode packets into one frame with default limits.
pub fn encode_frame(packets: &[Packet]) -> Result<String> {
    Codec::default().encode_frame(packets)
}

/// Decode a frame with default limits.
pub fn decode(frame: &str) -> Decoded {
    Codec::default().decode(frame)
}
