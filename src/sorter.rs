//! Container sorter.
//!
//! Orders the report by id, item count or volume utilization. The sort is
//! stable, so containers with equal keys keep the order they had before,
//! which for an unsorted report is the original placement order.
//!
//! Values that could not be parsed (`None`) always end up at the far end of
//! the requested direction: last when ascending, first when descending.

use std::cmp::Ordering;

use crate::model::ContainerRecord;
use crate::types::{SortKey, SortOrder, SortSpec};

/// Splits an id into a non-numeric prefix and a numeric suffix.
///
/// The prefix may be empty but must not contain digits, and the suffix must
/// run to the end of the id and fit in a `u64`.
///
/// # Examples
/// ```
/// use tote_report::sorter::split_id;
///
/// assert_eq!(split_id("Tote_10"), Some(("Tote_", 10)));
/// assert_eq!(split_id("42"), Some(("", 42)));
/// assert_eq!(split_id("A1B2"), None);
/// assert_eq!(split_id("Tote"), None);
/// ```
pub fn split_id(id: &str) -> Option<(&str, u64)> {
    let digits_start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(pos, _)| pos)?;

    let (prefix, suffix) = id.split_at(digits_start);
    if prefix.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    suffix.parse::<u64>().ok().map(|n| (prefix, n))
}

/// Compares two ids, numerically when they share a prefix.
///
/// Prefixes are matched case-insensitively, like the text fallback.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (split_id(a), split_id(b)) {
        (Some((prefix_a, n_a)), Some((prefix_b, n_b)))
            if prefix_a.to_lowercase() == prefix_b.to_lowercase() =>
        {
            n_a.cmp(&n_b)
        }
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Compares two optional values for the given direction.
///
/// Two missing values are equal; a single missing value sorts last when
/// ascending and first when descending.
pub fn compare_optional<T: PartialOrd>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
    let ascending = match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    };
    apply_order(ascending, order)
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    if order.is_descending() {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Comparator for a sort key and direction.
pub fn compare_records(a: &ContainerRecord, b: &ContainerRecord, spec: SortSpec) -> Ordering {
    match spec.key {
        SortKey::Id => apply_order(compare_ids(a.id(), b.id()), spec.order),
        SortKey::ItemCount => compare_optional(a.item_count(), b.item_count(), spec.order),
        SortKey::VolumeUtilization => compare_optional(
            a.volume_utilization(),
            b.volume_utilization(),
            spec.order,
        ),
    }
}

/// Ids of all records in sorted order. `records` itself is left untouched.
pub fn compute_order(spec: SortSpec, records: &[ContainerRecord]) -> Vec<String> {
    let mut compare =
        |a: &&ContainerRecord, b: &&ContainerRecord| compare_records(a, b, spec);
    let sorted = merge_sort_by(records.iter().collect(), &mut compare);
    sorted.into_iter().map(|r| r.id().to_owned()).collect()
}

/// Stable top-down merge sort.
///
/// Mixed ids (`A_2`, `A_10`, `A_1x`) do not form a total order under
/// [`compare_ids`]. `slice::sort_by` may panic on such input; this sort only
/// compares pairs while merging, so the result is always a permutation and
/// is the same for the same input.
fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    merged
}
