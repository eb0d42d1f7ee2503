use crate::entry::LogLevel;

/// Prefix words recognised in front of a structured message, upper-cased.
const PREFIXES: &[(&str, LogLevel)] = &[
    ("DEBUG", LogLevel::Debug),
    ("INFO", LogLevel::Info),
    ("WARN", LogLevel::Warn),
    ("WARNING", LogLevel::Warn),
    ("ERROR", LogLevel::Error),
    ("FATAL", LogLevel::Fatal),
    ("CRITICAL", LogLevel::Fatal),
];

/// Keywords scanned for in unstructured lines, most severe first.
const KEYWORDS: &[(&str, LogLevel)] = &[
    ("fatal", LogLevel::Fatal),
    ("critical", LogLevel::Fatal),
    ("panic", LogLevel::Fatal),
    ("error", LogLevel::Error),
    ("exception", LogLevel::Error),
    ("traceback", LogLevel::Error),
    ("warn", LogLevel::Warn),
    ("debug", LogLevel::Debug),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPrefix<'a> {
    pub level: LogLevel,
    /// The prefix exactly as written, including the colon and trailing blanks.
    pub raw: &'a str,
    pub rest: &'a str,
}

/// Detect a leading `LEVEL:` prefix (case-insensitive) and split it off.
pub fn split_level_prefix(message: &str) -> Option<LevelPrefix<'_>> {
    let word_len = message
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if word_len == 0 || message.as_bytes().get(word_len) != Some(&b':') {
        return None;
    }

    let word = &message[..word_len];
    let (_, level) = PREFIXES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word))?;

    let after_colon = &message[word_len + 1..];
    let blanks = after_colon.len() - after_colon.trim_start_matches([' ', '\t']).len();
    let split = word_len + 1 + blanks;

    Some(LevelPrefix {
        level: *level,
        raw: &message[..split],
        rest: &message[split..],
    })
}

/// Best-effort level for a line with no structure to go on.
pub fn detect_level(line: &str) -> LogLevel {
    let lower = line.to_ascii_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, level)| *level)
        .unwrap_or_default()
}
