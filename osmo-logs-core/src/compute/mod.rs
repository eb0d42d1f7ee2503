//! Pure computations over a slice of entries: filtered views, time
//! histograms and label facets. Nothing here keeps state between calls.

mod facets;
mod filter;
mod histogram;
mod search;

#[cfg(test)]
pub(crate) mod tests;

pub use facets::{FacetValue, FieldFacet, compute_facets};
pub use filter::{FilterParams, filter_entries};
pub use histogram::{
    DEFAULT_MIN_INTERVAL, DEFAULT_TARGET_BUCKETS, HistogramBucket, HistogramOptions,
    HistogramResult, compute_histogram,
};
pub use search::SearchPattern;
