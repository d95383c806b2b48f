use std::path::PathBuf;

use clap::Parser;

use rentdesk_config::RentConfig;

/// Command line of the `rentdesk` binary.
#[derive(Debug, Parser)]
#[command(name = "rentdesk", version, about = "Rentdesk - maintenance request service")]
pub struct Cli {
    /// Extra TOML config file, layered above rentdesk.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Socket address to listen on (overrides server.bind)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Database file path, or :memory: (overrides database.path)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Insert the demo data set if it is not already present
    #[arg(long)]
    pub seed_demo: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply flag overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut RentConfig) {
        if let Some(bind) = &self.bind {
            config.server.bind.clone_from(bind);
        }
        if let Some(path) = &self.database {
            config.database.path.clone_from(path);
        }
    }
}
