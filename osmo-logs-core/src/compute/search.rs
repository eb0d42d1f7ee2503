use regex::{Regex, RegexBuilder};

/// Compiled free-text search over entry messages. Always case-insensitive.
#[derive(Debug, Clone)]
pub enum SearchPattern {
    Substring { text: String, needle: String },
    Regex(Regex),
}

impl SearchPattern {
    /// Build a pattern. An invalid regex falls back to a literal substring
    /// search so a half-typed expression still filters something sensible.
    pub fn new(text: &str, regex: bool) -> Self {
        if !regex {
            return Self::substring(text);
        }

        match RegexBuilder::new(text).case_insensitive(true).build() {
            Ok(re) => SearchPattern::Regex(re),
            Err(e) => {
                tracing::debug!(pattern = text, error = %e, "invalid search regex, using substring match");
                Self::substring(text)
            }
        }
    }

    pub fn substring(text: &str) -> Self {
        SearchPattern::Substring {
            text: text.to_string(),
            needle: text.to_lowercase(),
        }
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            SearchPattern::Substring { needle, .. } => haystack.to_lowercase().contains(needle),
            SearchPattern::Regex(re) => re.is_match(haystack),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SearchPattern::Substring { text, .. } => text,
            SearchPattern::Regex(re) => re.as_str(),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, SearchPattern::Regex(_))
    }
}
