//! Packet encoding: `<type>:<id>[+]:<endpoint>[:<payload>]`.
//!
//! The trailing `:<payload>` segment is omitted when the kind has nothing to
//! send, so a bare noop encodes as `8::`.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, SockioError};
use crate::protocol::packet::{check_endpoint, is_numeric, JsonData, Packet, PacketBody};

/// Event payload as sent on the wire (field order: name, args).
#[derive(Serialize)]
struct EventWire<'a> {
    name: &'a str,
    args: &'a [Value],
}

/// Encode one packet into its canonical string form.
pub fn encode_packet(packet: &Packet) -> Result<String> {
    let mut out = String::with_capacity(16);
    out.push_str(&packet.kind().code().to_string());
    out.push(':');

    if let Some(id) = packet.id() {
        if !is_numeric(id.seq()) {
            return Err(SockioError::InvalidPacketFields(format!(
                "packet id must be decimal digits, got {:?}",
                id.seq()
            )));
        }
        out.push_str(&id.to_string());
    }
    out.push(':');

    check_endpoint(packet.endpoint())?;
    out.push_str(packet.endpoint());

    if let Some(payload) = encode_payload(packet.body())? {
        out.push(':');
        out.push_str(&payload);
    }
    Ok(out)
}

fn encode_payload(body: &PacketBody) -> Result<Option<String>> {
    let payload = match body {
        PacketBody::Disconnect | PacketBody::Heartbeat | PacketBody::NoOp => None,
        PacketBody::Connect { query } => query.clone(),
        PacketBody::Message { text } => Some(text.clone()),
        PacketBody::Json(JsonData::Value(v)) => Some(to_json(v)?),
        // Degraded packets re-emit their raw text.
        PacketBody::Json(JsonData::Malformed(raw)) => Some(raw.clone()),
        PacketBody::Event { name, args } => {
            if name.is_empty() {
                return Err(SockioError::InvalidPacketFields(
                    "event name must not be empty".into(),
                ));
            }
            Some(to_json(&EventWire { name, args })?)
        }
        PacketBody::Ack {
            ack_id,
            args,
            malformed_args,
        } => {
            if !is_numeric(ack_id) {
                return Err(SockioError::InvalidPacketFields(format!(
                    "ack must reference a numeric packet id, got {ack_id:?}"
                )));
            }
            let mut s = ack_id.clone();
            if let Some(raw) = malformed_args {
                s.push('+');
                s.push_str(raw);
            } else if !args.is_empty() {
                s.push('+');
                s.push_str(&to_json(args)?);
            }
            Some(s)
        }
        PacketBody::Error { reason, advice } => match advice {
            Some(advice) => Some(format!("{reason}+{advice}")),
            None if reason.is_empty() => None,
            None => Some(reason.clone()),
        },
    };
    Ok(payload)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| SockioError::Internal(format!("json serialize failed: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::protocol::packet::PacketId;
    use serde_json::json;

    #[test]
    fn event_scenario() {
        let p = Packet::event("chat", vec![json!("hi")]).unwrap();
        assert_eq!(
            encode_packet(&p).unwrap(),
            r#"5:::{"name":"chat","args":["hi"]}"#
        );
    }

    #[test]
    fn ack_without_args_is_bare_id() {
        let p = Packet::ack("5", vec![]).unwrap();
        assert_eq!(encode_packet(&p).unwrap(), "6:::5");

        let p = Packet::ack("5", vec![json!(1), json!("a")]).unwrap();
        assert_eq!(encode_packet(&p).unwrap(), r#"6:::5+[1,"a"]"#);
    }

    #[test]
    fn empty_payload_kinds_keep_three_segments() {
        assert_eq!(encode_packet(&Packet::noop()).unwrap(), "8::");
        assert_eq!(encode_packet(&Packet::heartbeat()).unwrap(), "2::");
        let p = Packet::disconnect().with_endpoint("/chat").unwrap();
        assert_eq!(encode_packet(&p).unwrap(), "0::/chat");
    }

    #[test]
    fn connect_query_is_payload() {
        let p = Packet::connect(Some("?token=abc".into()))
            .unwrap()
            .with_endpoint("/chat")
            .unwrap();
        assert_eq!(encode_packet(&p).unwrap(), "1::/chat:?token=abc");
        let p = Packet::connect(None).unwrap();
        assert_eq!(encode_packet(&p).unwrap(), "1::");
    }

    #[test]
    fn id_marker_follows_digits() {
        let p = Packet::message("hello").with_id(PacketId::without_ack("7").unwrap());
        assert_eq!(encode_packet(&p).unwrap(), "3:7+::hello");
        let p = Packet::message("").with_id(PacketId::new("0").unwrap());
        assert_eq!(encode_packet(&p).unwrap(), "3:0:::");
    }

    #[test]
    fn error_reason_and_advice() {
        let p = Packet::error("0", Some("1".into())).unwrap();
        assert_eq!(encode_packet(&p).unwrap(), "7:::0+1");
        let p = Packet::error("unauthorized", None).unwrap();
        assert_eq!(encode_packet(&p).unwrap(), "7:::unauthorized");
    }

    #[test]
    fn message_text_is_not_escaped() {
        let p = Packet::message("a:b:\"c\"");
        assert_eq!(encode_packet(&p).unwrap(), "3:::a:b:\"c\"");
    }
}
