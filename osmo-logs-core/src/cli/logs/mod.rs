//! Log commands
//!
//! - **tail**: follow a running workflow, printing entries as they arrive
//! - **query**: fetch once, filter, and print entries, stats or JSON
//! - **stats**: summarize a saved log file or stdin offline
//!
//! The data flow for every command is:
//!
//! LogTransport / file
//! LineParser
//! LogEntry
//! filter_entries
//! compute_histogram + compute_facets
//! render_entry / render_stats
//!

mod args;
mod constants;
mod render;
mod run;


pub use args::{FilterArgs, OutputArgs, QueryArgs, RequestArgs, StatsArgs, TailArgs};
pub use render::{render_entry, render_pretty, render_stats};
pub use run::{run_query, run_stats, run_tail};
