use crate::entry::LabelField;

/// Facets shown when none are requested explicitly.
pub const DEFAULT_FACETS: &[LabelField] = &[
    LabelField::Task,
    LabelField::Retry,
    LabelField::Level,
    LabelField::Source,
];

/// Widest histogram bar, in characters.
pub const MAX_BAR_WIDTH: usize = 40;

/// Facet values listed per field before eliding the rest.
pub const MAX_FACET_VALUES: usize = 10;

/// Workflow label for text read from files or stdin.
pub const LOCAL_WORKFLOW: &str = "local";
