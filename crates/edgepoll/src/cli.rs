use std::path::PathBuf;

use clap::Parser;

/// Poll a Ubiquiti EdgeSwitch's status API and expose the device and
/// its ports as polled entities.
#[derive(Debug, Parser)]
#[command(name = "edgepoll", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Poll every entity once, print its state, and exit.
    #[arg(long)]
    pub once: bool,
}

/// Connection options. Flags override the config file, which in turn
/// is overridden by `EDGEPOLL_*` environment variables at load time.
#[derive(Debug, clap::Args)]
pub struct GlobalOpts {
    /// Path to the config file (default: platform config dir).
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Switch hostname or IP address.
    #[arg(long)]
    pub host: Option<String>,

    /// Management HTTPS port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Management API username.
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Management API password.
    #[arg(long, env = "EDGEPOLL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (self-signed switches).
    #[arg(long)]
    pub insecure: bool,

    /// Interface to poll as a port entity (repeatable).
    #[arg(long = "interface", short = 'i', value_name = "IFACE")]
    pub interfaces: Vec<String>,

    /// Poll interval in seconds.
    #[arg(long)]
    pub interval: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}
