//! Single-packet decoding.
//!
//! Grammar: `type[:id[+][:endpoint[:payload]]]`. The payload is everything
//! after the third colon and is never re-split. The id `+` marker and the
//! ack payload `+` separator are handled in separate steps.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SockioError};
use crate::protocol::packet::{is_numeric, JsonData, Packet, PacketBody, PacketId, PacketType};

/// Event payload as received on the wire. Unknown keys are tolerated and
/// `args` may be missing or `null`.
#[derive(Deserialize)]
struct EventWire {
    name: String,
    #[serde(default)]
    args: Option<Vec<Value>>,
}

/// A decoded packet plus the payload error it was degraded for, if any.
#[derive(Debug)]
pub(crate) struct Parsed {
    pub packet: Packet,
    pub degraded: Option<SockioError>,
}

pub(crate) fn parse_packet(raw: &str) -> Result<Parsed> {
    let mut segments = raw.splitn(4, ':');
    let kind = parse_type(segments.next().unwrap_or_default())?;
    let id = parse_id(segments.next().unwrap_or_default())?;
    let endpoint = segments.next().unwrap_or_default().to_owned();
    let payload = segments.next();

    let (body, degraded) = parse_body(kind, payload)?;
    Ok(Parsed {
        packet: Packet::from_parts(id, endpoint, body),
        degraded,
    })
}

fn parse_type(seg: &str) -> Result<PacketType> {
    // `u8::from_str` accepts a leading `+`, so check digits first.
    if !is_numeric(seg) {
        return Err(SockioError::UnknownPacketType(seg.to_owned()));
    }
    seg.parse::<u8>()
        .ok()
        .and_then(PacketType::from_code)
        .ok_or_else(|| SockioError::UnknownPacketType(seg.to_owned()))
}

fn parse_id(seg: &str) -> Result<Option<PacketId>> {
    if seg.is_empty() {
        return Ok(None);
    }
    let (seq, ack) = match seg.strip_suffix('+') {
        Some(seq) => (seq, false),
        None => (seg, true),
    };
    if !is_numeric(seq) {
        return Err(SockioError::MalformedPacket(format!(
            "packet id must be decimal digits, got {seg:?}"
        )));
    }
    let id = if ack {
        PacketId::new(seq)
    } else {
        PacketId::without_ack(seq)
    };
    id.map(Some)
}

fn parse_body(kind: PacketType, payload: Option<&str>) -> Result<(PacketBody, Option<SockioError>)> {
    let body = match kind {
        PacketType::Disconnect | PacketType::Heartbeat | PacketType::NoOp => {
            if payload.is_some_and(|p| !p.is_empty()) {
                tracing::debug!(%kind, "ignoring payload on payload-less packet");
            }
            match kind {
                PacketType::Disconnect => PacketBody::Disconnect,
                PacketType::Heartbeat => PacketBody::Heartbeat,
                _ => PacketBody::NoOp,
            }
        }
        PacketType::Connect => PacketBody::Connect {
            query: payload.filter(|p| !p.is_empty()).map(str::to_owned),
        },
        PacketType::Message => PacketBody::Message {
            text: payload.unwrap_or_default().to_owned(),
        },
        PacketType::Json => {
            let raw = payload.unwrap_or_default();
            return Ok(match serde_json::from_str::<Value>(raw) {
                Ok(v) => (PacketBody::Json(JsonData::Value(v)), None),
                Err(e) => (
                    PacketBody::Json(JsonData::Malformed(raw.to_owned())),
                    Some(payload_error(kind, e.to_string())),
                ),
            });
        }
        PacketType::Event => {
            let ev: EventWire = serde_json::from_str(payload.unwrap_or_default())
                .map_err(|e| payload_error(kind, e.to_string()))?;
            if ev.name.is_empty() {
                return Err(payload_error(kind, "event name must not be empty".into()));
            }
            PacketBody::Event {
                name: ev.name,
                args: ev.args.unwrap_or_default(),
            }
        }
        PacketType::Ack => return parse_ack(payload.unwrap_or_default()),
        PacketType::Error => {
            let data = payload.unwrap_or_default();
            let (reason, advice) = match data.split_once('+') {
                Some((reason, advice)) => (reason, Some(advice).filter(|a| !a.is_empty())),
                None => (data, None),
            };
            PacketBody::Error {
                reason: reason.to_owned(),
                advice: advice.map(str::to_owned),
            }
        }
    };
    Ok((body, None))
}

fn parse_ack(data: &str) -> Result<(PacketBody, Option<SockioError>)> {
    let (ack_id, args_raw) = match data.split_once('+') {
        Some((id, args)) => (id, Some(args)),
        None => (data, None),
    };
    if !is_numeric(ack_id) {
        return Err(SockioError::MalformedPacket(format!(
            "ack payload must start with a numeric packet id, got {ack_id:?}"
        )));
    }

    let Some(args_raw) = args_raw else {
        return Ok((
            PacketBody::Ack {
                ack_id: ack_id.to_owned(),
                args: Vec::new(),
                malformed_args: None,
            },
            None,
        ));
    };

    match serde_json::from_str::<Vec<Value>>(args_raw) {
        Ok(args) => Ok((
            PacketBody::Ack {
                ack_id: ack_id.to_owned(),
                args,
                malformed_args: None,
            },
            None,
        )),
        Err(e) => Ok((
            PacketBody::Ack {
                ack_id: ack_id.to_owned(),
                args: Vec::new(),
                malformed_args: Some(args_raw.to_owned()),
            },
            Some(payload_error(PacketType::Ack, e.to_string())),
        )),
    }
}

fn payload_error(kind: PacketType, reason: String) -> SockioError {
    SockioError::PayloadParse { kind, reason }
}
