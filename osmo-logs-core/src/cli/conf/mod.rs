mod check;
mod dump;

#[cfg(test)]
mod tests;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to the config file
        #[arg(default_value = "osmo-logs.toml")]
        path: PathBuf,
    },

    /// Print the resolved configuration, environment overrides included
    Dump {
        /// Path to the config file (defaults are used when omitted)
        path: Option<PathBuf>,

        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Dump { path, json } => dump(path, json),
    }
}
