//! Log line parsing.
//!
//! Raw text from the workflow log endpoint flows through here on its way to
//! the compute layer and the live-tail stream:
//!
//! text
//! parse_log_batch (split on `\n`)
//! LineParser::parse_line
//! LogEntry
//!
//! A structured line looks like
//! `2024/01/01 10:00:00 [task retry-1] [osmo] ERROR: message`. Anything else is
//! kept as a "dump" line stamped with the current time.

mod ansi;
mod batch;
mod format;
mod level;
mod line;

#[cfg(test)]
mod tests;

pub use ansi::strip_ansi;
pub use batch::parse_log_batch;
pub use format::format_log_line;
pub use level::{LevelPrefix, detect_level, split_level_prefix};
pub use line::{Clock, FixedClock, LineParser, ParseContext, SystemClock, TIMESTAMP_FORMAT};
