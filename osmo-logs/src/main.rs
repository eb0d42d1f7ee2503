use clap::{Parser, Subcommand};
use osmo_logs_core::cli::conf::ConfigCmd;
use osmo_logs_core::cli::logs::{QueryArgs, StatsArgs, TailArgs, run_query, run_stats, run_tail};
use osmo_logs_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "osmo-logs",
    version,
    about = "Stream, filter and summarize OSMO workflow logs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow a workflow's logs as they are produced
    Tail(TailArgs),

    /// Fetch a workflow's logs once and print entries, stats or JSON
    Query(QueryArgs),

    /// Summarize a saved log file (or stdin)
    Stats(StatsArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Tail(args) => run_tail(args).await,
        Command::Query(args) => run_query(args).await,
        Command::Stats(args) => run_stats(args).await,
        Command::Config { cmd } => osmo_logs_core::cli::conf::run(cmd),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
