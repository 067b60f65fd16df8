//! JSON test vector loader and packet view shared by the frame tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use serde::Deserialize;
use serde_json::{json, Map, Value};

use sockio_core::{JsonData, Packet, PacketBody};

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub frame: String,
    #[serde(default)]
    pub expect: Vec<Value>,
    #[serde(default)]
    pub expect_errors: Vec<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub index: usize,
    pub code: String,
}

pub fn load(name: &str) -> TestVector {
    let s = std::fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

/// Flatten a packet into the JSON shape used by the vector files.
pub fn view(p: &Packet) -> Value {
    let mut m = Map::new();
    m.insert("type".into(), json!(p.kind().as_str()));
    if let Some(id) = p.id() {
        m.insert("id".into(), json!(id.seq()));
        m.insert("ack".into(), json!(id.expects_ack()));
    }
    m.insert("endpoint".into(), json!(p.endpoint()));

    match p.body() {
        PacketBody::Disconnect | PacketBody::Heartbeat | PacketBody::NoOp => {}
        PacketBody::Connect { query } => {
            if let Some(q) = query {
                m.insert("query".into(), json!(q));
            }
        }
        PacketBody::Message { text } => {
            m.insert("data".into(), json!(text));
        }
        PacketBody::Json(JsonData::Value(v)) => {
            m.insert("data".into(), v.clone());
        }
        PacketBody::Json(JsonData::Malformed(raw)) => {
            m.insert("data".into(), json!(raw));
            m.insert("parse_failed".into(), json!(true));
        }
        PacketBody::Event { name, args } => {
            m.insert("name".into(), json!(name));
            m.insert("args".into(), json!(args));
        }
        PacketBody::Ack {
            ack_id,
            args,
            malformed_args,
        } => {
            m.insert("ack_id".into(), json!(ack_id));
            m.insert("args".into(), json!(args));
            if malformed_args.is_some() {
                m.insert("parse_failed".into(), json!(true));
            }
        }
        PacketBody::Error { reason, advice } => {
            m.insert("reason".into(), json!(reason));
            if let Some(a) = advice {
                m.insert("advice".into(), json!(a));
            }
        }
    }
    Value::Object(m)
}
