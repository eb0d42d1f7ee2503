use crate::entry::{LabelField, LogEntry};
use ahash::AHashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFacet {
    pub field: LabelField,
    pub values: Vec<FacetValue>,
}

/// Count distinct values of each requested label field.
///
/// Values are ordered by count (descending), ties broken alphabetically.
/// Entries that do not carry the field are skipped.
pub fn compute_facets(entries: &[LogEntry], fields: &[LabelField]) -> Vec<FieldFacet> {
    fields
        .iter()
        .map(|&field| {
            let mut counts: AHashMap<&str, u64> = AHashMap::new();
            for entry in entries {
                if let Some(value) = entry.labels.get(field) {
                    *counts.entry(value).or_insert(0) += 1;
                }
            }

            let mut values: Vec<FacetValue> = counts
                .into_iter()
                .map(|(value, count)| FacetValue {
                    value: value.to_string(),
                    count,
                })
                .collect();
            values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

            FieldFacet { field, values }
        })
        .collect()
}
