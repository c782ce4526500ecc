//! Orogue terminal client (default binary).
//!
//! Connects to the game server, then alternates between drawing world events
//! and answering `action?` prompts from the keyboard until the game ends.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;

use orogue::client::{valid_camera_side, ClientConfig, Session};
use orogue::input::TerminalKeys;
use orogue::protocol::SocketTransport;
use orogue::term::{RawModeGuard, TerminalRenderer};
use orogue::types::MAX_CAMERA_SIDE;

/// Terminal client for the orogue tile-grid game
#[derive(Parser, Debug)]
#[command(name = "orogue")]
#[command(version)]
struct Args {
    /// Server host (default: OROGUE_HOST or localhost)
    #[arg(long)]
    host: Option<String>,

    /// Server port (default: OROGUE_PORT or 1029)
    #[arg(short, long)]
    port: Option<u16>,

    /// Camera width in cells
    #[arg(long, value_parser = parse_camera_side)]
    camera_width: Option<u32>,

    /// Camera height in cells
    #[arg(long, value_parser = parse_camera_side)]
    camera_height: Option<u32>,
}

impl Args {
    fn into_config(self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(w) = self.camera_width {
            config.camera_width = w;
        }
        if let Some(h) = self.camera_height {
            config.camera_height = h;
        }
        config
    }
}

fn parse_camera_side(s: &str) -> std::result::Result<u32, String> {
    let side: u32 = s.parse().map_err(|err| format!("{err}"))?;
    if valid_camera_side(side) {
        Ok(side)
    } else {
        Err(format!("must be between 1 and {MAX_CAMERA_SIDE}"))
    }
}

fn main() -> Result<()> {
    let _telemetry = telemetry::init_tracing("warn");
    let config = Args::parse().into_config();
    let addr = config.addr();

    let transport = SocketTransport::connect(&addr)
        .with_context(|| format!("failed to connect to {addr}"))?;
    let mut session = Session::connect(
        transport,
        TerminalKeys,
        TerminalRenderer::stdout(),
        config,
    )
    .context("invalid reception")?;

    let result = {
        let _raw = RawModeGuard::enter().context("failed to enable raw mode")?;
        let result = session.run();
        // Always try to restore terminal state.
        let _ = session.restore();
        result
    };

    let reason = result.context("invalid reception")?;
    println!("{}", reason.message());
    Ok(())
}
