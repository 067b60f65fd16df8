//! sockio-tools: decode and encode legacy Socket.IO frames from stdin.
//!
//! - `decode`: each stdin line is a frame; prints one JSON line per packet
//! - `encode`: each stdin line is a JSON packet description; prints the wire text
//!   or a JSON error line
//! - `RUST_LOG` controls log output (stderr)

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use sockio_core::error::{Result, SockioError};
use sockio_core::Codec;
use sockio_tools::config::{self, ToolsConfig};
use sockio_tools::run;

#[derive(Parser)]
#[command(
    name = "sockio-tools",
    version,
    about = "legacy Socket.IO frame decoding and encoding tools"
)]
struct Cli {
    /// Optional YAML config (codec limits, output options).
    #[arg(long)]
    config: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Subcommand)]
enum Command {
    /// Decode frames (one per line) into JSON packet descriptions.
    Decode,
    /// Encode JSON packet descriptions (one per line) into wire frames.
    Encode,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = match cli.config.as_deref() {
        Some(path) => config::load_from_file(path)?,
        None => ToolsConfig::default(),
    };
    let codec = Codec::new(cfg.codec)?;
    tracing::info!(limits = ?codec.limits(), "sockio-tools starting");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| SockioError::Internal(format!("read stdin failed: {e}")))?
    {
        let out = match cli.command {
            Command::Decode => run::decode_line(&codec, &cfg.output, &line)?,
            Command::Encode => vec![run::encode_report(&codec, &cfg.output, &line)?],
        };
        for l in out {
            stdout
                .write_all(format!("{l}\n").as_bytes())
                .await
                .map_err(|e| SockioError::Internal(format!("write stdout failed: {e}")))?;
        }
    }
    stdout
        .flush()
        .await
        .map_err(|e| SockioError::Internal(format!("flush stdout failed: {e}")))?;
    Ok(())
}
