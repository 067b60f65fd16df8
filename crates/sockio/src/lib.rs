//! Top-level facade crate for sockio.
//!
//! Re-exports the codec and the tools library so users can depend on a single crate.

pub mod core {
    pub use sockio_core::*;
}

pub mod tools {
    pub use sockio_tools::*;
}

pub use sockio_core::{decode, encode, encode_frame, Codec, Decoded, Packet, PacketType};
