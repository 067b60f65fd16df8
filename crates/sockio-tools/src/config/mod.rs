//! Tools config loader (strict parsing).

pub mod schema;

use std::fs;

use sockio_core::error::{Result, SockioError};

pub use schema::ToolsConfig;

pub fn load_from_file(path: &str) -> Result<ToolsConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SockioError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ToolsConfig> {
    let cfg: ToolsConfig = serde_yaml::from_str(s)
        .map_err(|e| SockioError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
