//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use sv_sync::PollConfig;
use sv_transport::config::{DEFAULT_HOST, DEFAULT_PORT};
use sv_transport::{Endpoint, TransportConfig};

/// Live map dashboard for the spreading simulation.
///
/// Polls the simulation server for new frames and keeps `merged.csv` and
/// the per-frame snapshots under `--data-dir` up to date.  Press Enter to
/// poll immediately; type `q` to quit.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version)]
pub struct Args {
    /// Simulation server host.
    #[arg(default_value = DEFAULT_HOST)]
    pub host: String,

    /// Simulation server port.
    #[arg(default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Static city reference table (CSV).
    #[arg(long, default_value = "DATA/initial.csv")]
    pub reference: PathBuf,

    /// Directory receiving merged.csv and frames/.
    #[arg(long, default_value = "DATA")]
    pub data_dir: PathBuf,

    /// Connect, read and write timeout in milliseconds.
    #[arg(long, default_value_t = 5_000)]
    pub timeout_ms: u64,

    /// Poll interval while frames keep arriving, in milliseconds.
    #[arg(long, default_value_t = 2_000)]
    pub min_poll_ms: u64,

    /// Longest poll interval for an idle or unreachable server, in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    pub max_poll_ms: u64,

    /// Stop after this many sync cycles.
    #[arg(long)]
    pub max_cycles: Option<u64>,

    /// Do not send `start` to the simulation on launch.
    #[arg(long)]
    pub no_start: bool,

    /// Send `out` to the simulation before exiting.
    #[arg(long)]
    pub stop_on_exit: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::with_timeout(Duration::from_millis(self.timeout_ms))
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            min_interval: Duration::from_millis(self.min_poll_ms),
            max_interval: Duration::from_millis(self.max_poll_ms),
            ..PollConfig::default()
        }
    }
}
