//! JSON description of a packet, as read and printed by the tools.
//!
//! Converting a description into a `Packet` goes through the validating
//! constructors, and any field outside the kind's contract is rejected
//! with `InvalidPacketFields` instead of being dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sockio_core::error::{Result, SockioError};
use sockio_core::{JsonData, Packet, PacketBody, PacketId, PacketType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacketDesc {
    #[serde(rename = "type")]
    pub kind: PacketType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whether the sender expects an ack for `id`; printed only when false.
    #[serde(default = "default_ack", skip_serializing_if = "is_true")]
    pub ack: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Value>>,
    /// Message text, or the JSON document of a json packet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub parse_failed: bool,
}

fn default_ack() -> bool {
    true
}

fn is_true(b: &bool) -> bool {
    *b
}

impl PacketDesc {
    fn empty(kind: PacketType) -> Self {
        Self {
            kind,
            id: None,
            ack: true,
            endpoint: String::new(),
            name: None,
            args: None,
            data: None,
            ack_id: None,
            reason: None,
            advice: None,
            query: None,
            parse_failed: false,
        }
    }

    /// Names of populated fields that `kind` does not accept.
    fn stray_fields(&self) -> Vec<&'static str> {
        let allowed: &[&str] = match self.kind {
            PacketType::Disconnect | PacketType::Heartbeat | PacketType::NoOp => &[],
            PacketType::Connect => &["query"],
            PacketType::Message | PacketType::Json => &["data"],
            PacketType::Event => &["name", "args"],
            PacketType::Ack => &["ack_id", "args"],
            PacketType::Error => &["reason", "advice"],
        };
        let present = [
            ("name", self.name.is_some()),
            ("args", self.args.is_some()),
            ("data", self.data.is_some()),
            ("ack_id", self.ack_id.is_some()),
            ("reason", self.reason.is_some()),
            ("advice", self.advice.is_some()),
            ("query", self.query.is_some()),
            ("parse_failed", self.parse_failed),
        ];
        present
            .into_iter()
            .filter(|(field, set)| *set && !allowed.contains(field))
            .map(|(field, _)| field)
            .collect()
    }
}

impl From<&Packet> for PacketDesc {
    fn from(p: &Packet) -> Self {
        let mut d = Self::empty(p.kind());
        if let Some(id) = p.id() {
            d.id = Some(id.seq().to_owned());
            d.ack = id.expects_ack();
        }
        d.endpoint = p.endpoint().to_owned();

        match p.body() {
            PacketBody::Disconnect | PacketBody::Heartbeat | PacketBody::NoOp => {}
            PacketBody::Connect { query } => d.query = query.clone(),
            PacketBody::Message { text } => d.data = Some(Value::String(text.clone())),
            PacketBody::Json(JsonData::Value(v)) => d.data = Some(v.clone()),
            PacketBody::Json(JsonData::Malformed(raw)) => {
                d.data = Some(Value::String(raw.clone()));
                d.parse_failed = true;
            }
            PacketBody::Event { name, args } => {
                d.name = Some(name.clone());
                d.args = Some(args.clone());
            }
            PacketBody::Ack {
                ack_id,
                args,
                malformed_args,
            } => {
                d.ack_id = Some(ack_id.clone());
                d.args = Some(args.clone());
                d.parse_failed = malformed_args.is_some();
            }
            PacketBody::Error { reason, advice } => {
                d.reason = Some(reason.clone());
                d.advice = advice.clone();
            }
        }
        d
    }
}

impl TryFrom<PacketDesc> for Packet {
    type Error = SockioError;

    fn try_from(d: PacketDesc) -> Result<Packet> {
        let stray = d.stray_fields();
        if !stray.is_empty() {
            return Err(SockioError::InvalidPacketFields(format!(
                "{} packets do not accept: {}",
                d.kind,
                stray.join(", ")
            )));
        }

        let packet = match d.kind {
            PacketType::Disconnect => Packet::disconnect(),
            PacketType::Connect => Packet::connect(d.query)?,
            PacketType::Heartbeat => Packet::heartbeat(),
            PacketType::Message => match d.data {
                None => Packet::message(""),
                Some(Value::String(text)) => Packet::message(text),
                Some(_) => {
                    return Err(SockioError::InvalidPacketFields(
                        "message data must be a string".into(),
                    ))
                }
            },
            PacketType::Json => Packet::json(d.data.unwrap_or(Value::Null)),
            PacketType::Event => Packet::event(d.name.unwrap_or_default(), d.args.unwrap_or_default())?,
            PacketType::Ack => Packet::ack(d.ack_id.unwrap_or_default(), d.args.unwrap_or_default())?,
            PacketType::Error => Packet::error(d.reason.unwrap_or_default(), d.advice)?,
            PacketType::NoOp => Packet::noop(),
        };

        let packet = match d.id {
            Some(seq) if d.ack => packet.with_id(PacketId::new(seq)?),
            Some(seq) => packet.with_id(PacketId::without_ack(seq)?),
            None => packet,
        };
        packet.with_endpoint(d.endpoint)
    }
}
