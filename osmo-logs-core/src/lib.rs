pub mod adapter;
pub mod cli;
pub mod compute;
pub mod conf;
pub mod entry;
pub mod logging;
pub mod parse;
pub mod stream;

pub use adapter::{LogAdapter, LogQueryResult};
pub use entry::LogEntry;
