//! Column order for the preview table.
//!
//! Columns are derived from the records themselves: the union of their keys,
//! minus the machine-tagged `normalized` string, sorted so that address parts
//! read in postal order and the echoed input comes last.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde_json::Value;

/// Address fields in display order.
pub const CANONICAL_COLUMNS: [&str; 15] = [
    "zip",
    "oblast",
    "city",
    "district",
    "street",
    "build",
    "corp",
    "entrance",
    "floor",
    "room",
    "code",
    "provider",
    "branch_type",
    "branch_id",
    "poi",
];

/// Never shown in the table; still part of the download.
pub const HIDDEN_COLUMN: &str = "normalized";

/// Always the last column.
pub const TRAILING_COLUMN: &str = "original";

/// Ordered union of the keys of every object in `records`.
///
/// Non-object entries contribute no keys. The result depends only on the key
/// set, never on values or on which record a key was first seen in.
pub fn order_columns(records: &[Value]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns: Vec<String> = records
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|record| record.keys())
        .filter(|key| key.as_str() != HIDDEN_COLUMN)
        .filter(|key| seen.insert(key.as_str()))
        .cloned()
        .collect();
    columns.sort_by(|a, b| compare_columns(a, b));
    columns
}

pub fn compare_columns(a: &str, b: &str) -> Ordering {
    match (a == TRAILING_COLUMN, b == TRAILING_COLUMN) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    match (canonical_rank(a), canonical_rank(b)) {
        (Some(rank_a), Some(rank_b)) => rank_a.cmp(&rank_b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => collate(a, b),
    }
}

fn canonical_rank(key: &str) -> Option<usize> {
    CANONICAL_COLUMNS.iter().position(|column| *column == key)
}

/// Root-locale style comparison: punctuation before digits before letters,
/// letters compared case-insensitively first, lowercase before uppercase on ties.
fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}
