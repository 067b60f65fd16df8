//! Packet model (one variant per packet kind).
//!
//! A `Packet` is built once through a per-kind constructor and never mutated
//! afterwards. Kind-specific fields live in `PacketBody`, so an `Event` can
//! never carry an error reason and a `NoOp` can never carry args.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SockioError};

/// Packet kind. The numeric codes are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketType {
    Disconnect = 0,
    Connect = 1,
    Heartbeat = 2,
    Message = 3,
    Json = 4,
    Event = 5,
    Ack = 6,
    Error = 7,
    NoOp = 8,
}

impl PacketType {
    /// All kinds, ordered by wire code.
    pub const ALL: [PacketType; 9] = [
        PacketType::Disconnect,
        PacketType::Connect,
        PacketType::Heartbeat,
        PacketType::Message,
        PacketType::Json,
        PacketType::Event,
        PacketType::Ack,
        PacketType::Error,
        PacketType::NoOp,
    ];

    /// Wire code (0..=8).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Lowercase name ("disconnect" ... "noop").
    pub fn as_str(self) -> &'static str {
        match self {
            PacketType::Disconnect => "disconnect",
            PacketType::Connect => "connect",
            PacketType::Heartbeat => "heartbeat",
            PacketType::Message => "message",
            PacketType::Json => "json",
            PacketType::Event => "event",
            PacketType::Ack => "ack",
            PacketType::Error => "error",
            PacketType::NoOp => "noop",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packet sequence id, plus whether the sender expects an acknowledgement.
///
/// On the wire a trailing `+` after the digits marks "no ack expected".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PacketId {
    seq: String,
    ack: bool,
}

impl PacketId {
    /// Id for a packet that expects an acknowledgement.
    pub fn new(seq: impl Into<String>) -> Result<Self> {
        Self::build(seq.into(), true)
    }

    /// Id for a packet that does not expect an acknowledgement.
    pub fn without_ack(seq: impl Into<String>) -> Result<Self> {
        Self::build(seq.into(), false)
    }

    fn build(seq: String, ack: bool) -> Result<Self> {
        if !is_numeric(&seq) {
            return Err(SockioError::InvalidPacketFields(format!(
                "packet id must be decimal digits, got {seq:?}"
            )));
        }
        Ok(Self { seq, ack })
    }

    pub fn seq(&self) -> &str {
        &self.seq
    }

    pub fn expects_ack(&self) -> bool {
        self.ack
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.seq)?;
        if !self.ack {
            f.write_str("+")?;
        }
        Ok(())
    }
}

/// Payload of a `Json` packet.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonData {
    Value(Value),
    /// Raw text that failed to parse as JSON (parse-failed marker).
    Malformed(String),
}

/// Kind-specific packet fields.
#[derive(Debug, Clone, PartialEq)]
pub enum PacketBody {
    Disconnect,
    Connect {
        query: Option<String>,
    },
    Heartbeat,
    Message {
        text: String,
    },
    Json(JsonData),
    Event {
        name: String,
        args: Vec<Value>,
    },
    Ack {
        ack_id: String,
        args: Vec<Value>,
        /// Raw args text that was not a JSON array (parse-failed marker).
        malformed_args: Option<String>,
    },
    Error {
        reason: String,
        advice: Option<String>,
    },
    NoOp,
}

impl PacketBody {
    pub fn kind(&self) -> PacketType {
        match self {
            PacketBody::Disconnect => PacketType::Disconnect,
            PacketBody::Connect { .. } => PacketType::Connect,
            PacketBody::Heartbeat => PacketType::Heartbeat,
            PacketBody::Message { .. } => PacketType::Message,
            PacketBody::Json(_) => PacketType::Json,
            PacketBody::Event { .. } => PacketType::Event,
            PacketBody::Ack { .. } => PacketType::Ack,
            PacketBody::Error { .. } => PacketType::Error,
            PacketBody::NoOp => PacketType::NoOp,
        }
    }
}

/// One logical Socket.IO packet.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    id: Option<PacketId>,
    endpoint: String,
    body: PacketBody,
}

impl Packet {
    fn root(body: PacketBody) -> Self {
        Self {
            id: None,
            endpoint: String::new(),
            body,
        }
    }

    /// Used by the decoder, which has already validated every segment.
    pub(crate) fn from_parts(id: Option<PacketId>, endpoint: String, body: PacketBody) -> Self {
        Self { id, endpoint, body }
    }

    pub fn disconnect() -> Self {
        Self::root(PacketBody::Disconnect)
    }

    /// Connect packet, optionally carrying a query string (e.g. `?token=abc`).
    pub fn connect(query: Option<String>) -> Result<Self> {
        if query.as_deref() == Some("") {
            return Err(SockioError::InvalidPacketFields(
                "connect query must not be empty when present".into(),
            ));
        }
        Ok(Self::root(PacketBody::Connect { query }))
    }

    pub fn heartbeat() -> Self {
        Self::root(PacketBody::Heartbeat)
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self::root(PacketBody::Message { text: text.into() })
    }

    pub fn json(value: Value) -> Self {
        Self::root(PacketBody::Json(JsonData::Value(value)))
    }

    pub fn event(name: impl Into<String>, args: Vec<Value>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SockioError::InvalidPacketFields(
                "event name must not be empty".into(),
            ));
        }
        Ok(Self::root(PacketBody::Event { name, args }))
    }

    /// Acknowledgement for the packet whose id is `ack_id`.
    pub fn ack(ack_id: impl Into<String>, args: Vec<Value>) -> Result<Self> {
        let ack_id = ack_id.into();
        if !is_numeric(&ack_id) {
            return Err(SockioError::InvalidPacketFields(format!(
                "ack must reference a numeric packet id, got {ack_id:?}"
            )));
        }
        Ok(Self::root(PacketBody::Ack {
            ack_id,
            args,
            malformed_args: None,
        }))
    }

    pub fn error(reason: impl Into<String>, advice: Option<String>) -> Result<Self> {
        let reason = reason.into();
        if reason.is_empty() {
            return Err(SockioError::InvalidPacketFields(
                "error reason must not be empty".into(),
            ));
        }
        // `+` separates reason from advice on the wire.
        if reason.contains('+') {
            return Err(SockioError::InvalidPacketFields(
                "error reason must not contain '+'".into(),
            ));
        }
        if advice.as_deref() == Some("") {
            return Err(SockioError::InvalidPacketFields(
                "error advice must not be empty when present".into(),
            ));
        }
        Ok(Self::root(PacketBody::Error { reason, advice }))
    }

    pub fn noop() -> Self {
        Self::root(PacketBody::NoOp)
    }

    pub fn with_id(self, id: PacketId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// Set the namespace. An empty endpoint is the root namespace.
    pub fn with_endpoint(self, endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        check_endpoint(&endpoint)?;
        Ok(Self { endpoint, ..self })
    }

    pub fn kind(&self) -> PacketType {
        self.body.kind()
    }

    pub fn id(&self) -> Option<&PacketId> {
        self.id.as_ref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn body(&self) -> &PacketBody {
        &self.body
    }

    pub fn into_body(self) -> PacketBody {
        self.body
    }

    /// Event name; `None` for every other kind.
    pub fn name(&self) -> Option<&str> {
        match &self.body {
            PacketBody::Event { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Event or ack arguments; empty for every other kind.
    pub fn args(&self) -> &[Value] {
        match &self.body {
            PacketBody::Event { args, .. } | PacketBody::Ack { args, .. } => args,
            _ => &[],
        }
    }

    /// Payload as JSON where the kind carries JSON.
    pub fn data_as_json(&self) -> Option<Value> {
        match &self.body {
            PacketBody::Json(JsonData::Value(v)) => Some(v.clone()),
            PacketBody::Event { name, args } => Some(serde_json::json!({
                "name": name,
                "args": args,
            })),
            PacketBody::Ack {
                args,
                malformed_args: None,
                ..
            } => Some(Value::Array(args.clone())),
            _ => None,
        }
    }

    /// True when the decoder kept this packet despite an unparseable JSON payload.
    pub fn is_parse_failed(&self) -> bool {
        matches!(
            &self.body,
            PacketBody::Json(JsonData::Malformed(_))
                | PacketBody::Ack {
                    malformed_args: Some(_),
                    ..
                }
        )
    }
}

pub(crate) fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn check_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.contains(':') {
        return Err(SockioError::InvalidPacketFields(format!(
            "endpoint must not contain ':', got {endpoint:?}"
        )));
    }
    Ok(())
}
