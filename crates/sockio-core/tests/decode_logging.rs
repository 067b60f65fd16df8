//! Decode emits a debug event for every frame shape.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use sockio_core::{decode, frame_wrap};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn logs_of(frame: &str) -> String {
    let cap = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(cap.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        decode(frame);
    });
    let bytes = cap.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn single_packet_frame_is_logged() {
    let logs = logs_of("3:1::hello");
    assert!(logs.contains("decoded single-packet frame"), "logs={logs}");
    assert!(logs.contains("packets=1"), "logs={logs}");
}

#[test]
fn multiplexed_frame_is_logged() {
    let frame = format!("{}{}", frame_wrap("8::"), frame_wrap("2::"));
    let logs = logs_of(&frame);
    assert!(logs.contains("decoded multiplexed frame"), "logs={logs}");
    assert!(logs.contains("packets=2"), "logs={logs}");
}
