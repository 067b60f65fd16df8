use serde::Deserialize;
use sockio_core::error::{Result, SockioError};
use sockio_core::CodecLimits;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    pub version: u32,

    #[serde(default)]
    pub codec: CodecLimits,

    #[serde(default)]
    pub output: OutputSection,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            version: 1,
            codec: CodecLimits::default(),
            output: OutputSection::default(),
        }
    }
}

impl ToolsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SockioError::UnsupportedVersion);
        }
        self.codec.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Emit a JSON line for each rejected group (in addition to the warn log).
    #[serde(default = "default_report_errors")]
    pub report_errors: bool,

    /// Longest raw group text echoed in an error line, in characters.
    #[serde(default = "default_max_raw_chars")]
    pub max_raw_chars: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            report_errors: default_report_errors(),
            max_raw_chars: default_max_raw_chars(),
        }
    }
}

impl OutputSection {
    pub fn validate(&self) -> Result<()> {
        if !(16..=65536).contains(&self.max_raw_chars) {
            return Err(SockioError::InvalidConfig(
                "output.max_raw_chars must be between 16 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_report_errors() -> bool {
    true
}
fn default_max_raw_chars() -> usize {
    256
}
