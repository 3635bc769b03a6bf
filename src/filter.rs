//! SKU filter.
//!
//! A record is visible when one of its SKUs contains the search term,
//! compared case-insensitively. An empty term shows everything.

use crate::model::ContainerRecord;
use crate::types::{ViewState, normalize_filter};

/// Checks a record against an already normalized search term.
pub fn sku_matches(record: &ContainerRecord, normalized: &str) -> bool {
    normalized.is_empty()
        || record
            .skus()
            .iter()
            .any(|sku| sku.to_lowercase().contains(normalized))
}

/// Visibility of every record for the given state, in record order.
pub fn compute_visibility(state: &ViewState, records: &[ContainerRecord]) -> Vec<bool> {
    visibility_for(&state.filter, records)
}

/// Visibility of every record for a raw search term, in record order.
pub fn visibility_for(filter: &str, records: &[ContainerRecord]) -> Vec<bool> {
    let normalized = normalize_filter(filter);
    records
        .iter()
        .map(|record| sku_matches(record, &normalized))
        .collect()
}
