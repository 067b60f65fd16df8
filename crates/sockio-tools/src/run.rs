//! Line processing for the `decode` and `encode` commands.
//!
//! Each input line is one transport frame (decode) or one JSON packet
//! description (encode). Functions here are synchronous; `main` owns the
//! stdin/stdout plumbing.

use serde::Serialize;

use sockio_core::error::{Result, SockioError};
use sockio_core::{Codec, GroupError, Packet};

use crate::config::schema::OutputSection;
use crate::desc::PacketDesc;

/// Error line printed for a rejected frame group or packet description.
#[derive(Debug, Serialize)]
struct ErrorLine<'a> {
    error: &'static str,
    index: usize,
    message: String,
    raw: &'a str,
}

/// Decode one frame into output lines: one per packet, then one per error.
pub fn decode_line(codec: &Codec, output: &OutputSection, frame: &str) -> Result<Vec<String>> {
    let decoded = codec.decode(frame);
    let mut lines = Vec::with_capacity(decoded.packets.len() + decoded.errors.len());

    for packet in &decoded.packets {
        lines.push(to_json(&PacketDesc::from(packet))?);
    }
    if output.report_errors {
        for e in &decoded.errors {
            lines.push(error_line(e, output.max_raw_chars)?);
        }
    }
    Ok(lines)
}

/// Encode one JSON packet description into its wire form.
pub fn encode_line(codec: &Codec, line: &str) -> Result<String> {
    let desc: PacketDesc = serde_json::from_str(line)
        .map_err(|e| SockioError::InvalidPacketFields(format!("invalid packet description: {e}")))?;
    let packet = Packet::try_from(desc)?;
    codec.encode(&packet)
}

/// Encode one description, turning a rejection into an error line.
pub fn encode_report(codec: &Codec, output: &OutputSection, line: &str) -> Result<String> {
    match encode_line(codec, line) {
        Ok(wire) => Ok(wire),
        Err(e) => {
            tracing::warn!(code = e.code().as_str(), error = %e, "packet rejected");
            render_error(&e, 0, line, output.max_raw_chars)
        }
    }
}

fn error_line(e: &GroupError, max_raw_chars: usize) -> Result<String> {
    render_error(&e.error, e.index, &e.raw, max_raw_chars)
}

fn render_error(error: &SockioError, index: usize, raw: &str, max_raw_chars: usize) -> Result<String> {
    let raw = match raw.char_indices().nth(max_raw_chars) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    };
    to_json(&ErrorLine {
        error: error.code().as_str(),
        index,
        message: error.to_string(),
        raw,
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| SockioError::Internal(format!("json serialize failed: {e}")))
}
