use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize diagnostics for the CLI.
///
/// - Level filtering comes from `RUST_LOG` (defaults to "info")
/// - Output goes to stderr so stdout only ever carries log lines
/// - JSON with flattened fields when stderr is not a terminal, compact text otherwise
/// - `TOKIO_CONSOLE` set: hand everything to tokio-console instead
pub fn init_logging() {
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
    } else {
        init_normal_logging();
    }
}

fn init_normal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if io::stderr().is_terminal() {
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .compact()
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .flatten_event(true)
            .init();
    }
}

fn init_console_logging() {
    console_subscriber::init();
}

/// How entries are printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// The reconstructed original line.
    Raw,
    /// Colored by level, with task and retry columns.
    Pretty,
}

pub fn default_log_mode() -> LogMode {
    if io::stdout().is_terminal() {
        LogMode::Pretty
    } else {
        LogMode::Raw
    }
}

impl LogMode {
    pub fn from_flags(raw: bool, pretty: bool) -> Self {
        if raw {
            LogMode::Raw
        } else if pretty {
            LogMode::Pretty
        } else {
            default_log_mode()
        }
    }
}
