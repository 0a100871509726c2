//! Sort stage of the view pipeline
//!
//! Ordering is stable: records whose keys compare equal keep their input
//! order in both directions. Descending order inverts the comparator rather
//! than reversing the output, which would flip ties.

use crate::core::query::{SortDirection, SortField, SortSpec};
use crate::core::record::Record;
use std::cmp::Ordering;

/// Compare two strings the way a human-facing list expects
///
/// Letters compare case-insensitively first, so `"alpha"` sorts before
/// `"Beta"`. Strings that differ only by case order lowercase first, and
/// anything still equal falls back to code point order.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if primary != Ordering::Equal {
        return primary;
    }

    // Tertiary level: at the first case difference, lowercase wins
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => return ca.cmp(&cb),
            }
        }
    }

    a.len().cmp(&b.len())
}

/// Compare two records on a single field, ascending
pub fn compare_by(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => locale_compare(&a.name, &b.name),
        SortField::Status => locale_compare(&a.status, &b.status),
    }
}

/// Compare two records under a full sort spec
pub fn compare(a: &Record, b: &Record, spec: &SortSpec) -> Ordering {
    let ord = compare_by(a, b, spec.field);
    match spec.direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Order records by `spec`, keeping ties in input order
pub fn sort<'a>(mut records: Vec<&'a Record>, spec: &SortSpec) -> Vec<&'a Record> {
    // slice::sort_by is a stable merge sort
    records.sort_by(|a, b| compare(a, b, spec));
    records
}
