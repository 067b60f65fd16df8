//! Decode limits (strict parsing, validated ranges).

use serde::Deserialize;

use crate::error::{Result, SockioError};

/// Upper bounds applied to inbound frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecLimits {
    /// Maximum frame size in Unicode scalar values.
    #[serde(default = "default_max_frame_chars")]
    pub max_frame_chars: usize,

    /// Maximum number of groups decoded from one multiplexed frame.
    #[serde(default = "default_max_groups")]
    pub max_groups: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_frame_chars: default_max_frame_chars(),
            max_groups: default_max_groups(),
        }
    }
}

impl CodecLimits {
    pub fn validate(&self) -> Result<()> {
        if !(64..=64 * 1024 * 1024).contains(&self.max_frame_chars) {
            return Err(SockioError::InvalidConfig(
                "codec.max_frame_chars must be between 64 and 67108864".into(),
            ));
        }
        if !(1..=65536).contains(&self.max_groups) {
            return Err(SockioError::InvalidConfig(
                "codec.max_groups must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_frame_chars() -> usize {
    1024 * 1024
}
fn default_max_groups() -> usize {
    1024
}
