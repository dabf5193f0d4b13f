use serde::Serialize;
use serde_json::Value;

/// Number of records shown before the user has to download the full result.
pub const PREVIEW_LIMIT: usize = 5;

const RESULTS_FIELD: &str = "results";

/// A service response reduced to one of the two shapes the UI knows about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    /// The response body itself, treated as one record.
    Single(Value),
    /// The unwrapped `results` list of a batch envelope.
    Many(Vec<Value>),
}

impl NormalizedResult {
    /// First [`PREVIEW_LIMIT`] records, or the single record as a one-element slice.
    pub fn preview(&self) -> &[Value] {
        match self {
            NormalizedResult::Single(record) => std::slice::from_ref(record),
            NormalizedResult::Many(records) => &records[..records.len().min(PREVIEW_LIMIT)],
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, NormalizedResult::Many(_))
    }

    pub fn record_count(&self) -> usize {
        match self {
            NormalizedResult::Single(_) => 1,
            NormalizedResult::Many(records) => records.len(),
        }
    }
}

/// Unwraps `{"results": [...]}` envelopes; every other body is one record.
///
/// Field values are left untouched.
pub fn normalize(mut response: Value) -> NormalizedResult {
    if let Value::Object(map) = &mut response {
        if let Some(Value::Array(records)) = map.get_mut(RESULTS_FIELD) {
            return NormalizedResult::Many(std::mem::take(records));
        }
    }
    NormalizedResult::Single(response)
}
