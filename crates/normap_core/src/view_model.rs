use serde_json::Value;

use crate::{order_columns, InputMode, NormalizedResult, Phase, SelectedFile};

/// Cell text for a key the record does not have.
pub const NULL_PLACEHOLDER: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub mode: InputMode,
    pub phase: Phase,
    pub text: String,
    pub selected_file: Option<SelectedFileView>,
    /// Mode toggle, text box and file picker.
    pub controls_enabled: bool,
    pub submit_enabled: bool,
    pub error: Option<String>,
    pub preview: Option<Preview>,
    pub download: Option<DownloadView>,
    pub total_records: Option<usize>,
    pub hidden_records_notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileView {
    pub name: String,
    pub bytes: u64,
    pub size_label: String,
}

impl SelectedFileView {
    pub(crate) fn from_file(file: &SelectedFile) -> Self {
        Self {
            name: file.name.clone(),
            bytes: file.size(),
            size_label: format!("{:.2} KB", file.size() as f64 / 1024.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadView {
    pub file_name: String,
    pub byte_len: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// One row per preview record, one cell per column.
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Top-level entries of a result that is not a list of records.
    KeyValue(Vec<(String, String)>),
}

impl Preview {
    /// A table when the result is a list of records, key/value entries otherwise.
    pub fn from_result(result: &NormalizedResult) -> Self {
        let slice = result.preview();
        match slice.first() {
            Some(Value::Object(_)) if result.is_list() => {
                let columns = order_columns(slice);
                let rows = slice
                    .iter()
                    .map(|record| {
                        columns
                            .iter()
                            .map(|column| match record.get(column.as_str()) {
                                Some(value) => display_value(value),
                                None => NULL_PLACEHOLDER.to_string(),
                            })
                            .collect()
                    })
                    .collect();
                Preview::Table { columns, rows }
            }
            _ => Preview::KeyValue(top_level_entries(result)),
        }
    }
}

fn top_level_entries(result: &NormalizedResult) -> Vec<(String, String)> {
    match result {
        NormalizedResult::Single(Value::Object(record)) => record
            .iter()
            .map(|(key, value)| (key.clone(), display_value(value)))
            .collect(),
        NormalizedResult::Single(value) => vec![("value".to_string(), display_value(value))],
        NormalizedResult::Many(records) => records
            .iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), display_value(value)))
            .collect(),
    }
}

/// String form of a field value: strings unquoted, integral floats without
/// a fraction, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => display_float(float)
                .unwrap_or_else(|| number.to_string()),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

const INTEGRAL_FLOAT_LIMIT: f64 = 1e21;

/// `1.0` prints as `1` and `-0.0` as `0`, up to the point where plain digits
/// give way to exponent notation.
fn display_float(float: f64) -> Option<String> {
    if float == 0.0 {
        return Some("0".to_string());
    }
    (float.fract() == 0.0 && float.abs() < INTEGRAL_FLOAT_LIMIT).then(|| format!("{float}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_like_text() {
        assert_eq!(display_value(&json!("Хрещатик")), "Хрещатик");
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!(12)), "12");
        assert_eq!(display_value(&json!(0.5)), "0.5");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(["a", 1])), r#"["a",1]"#);
    }

    #[test]
    fn integral_floats_drop_the_fraction() {
        assert_eq!(display_value(&json!(1.0)), "1");
        assert_eq!(display_value(&json!(-42.0)), "-42");
        assert_eq!(display_value(&json!(-0.0)), "0");
        assert_eq!(display_value(&json!(1e20)), "100000000000000000000");
        assert_eq!(display_value(&json!(2.25)), "2.25");
        assert_eq!(display_value(&json!(1e21)), json!(1e21).to_string());
    }

    #[test]
    fn selected_file_size_has_two_decimals() {
        let file = SelectedFile::new("адреси.csv", "text/csv", vec![b'a'; 1536]);
        let view = SelectedFileView::from_file(&file);
        assert_eq!(view.name, "адреси.csv");
        assert_eq!(view.bytes, 1536);
        assert_eq!(view.size_label, "1.50 KB");
        assert_eq!(
            SelectedFileView::from_file(&SelectedFile::new("a.txt", "text/plain", vec![0; 20]))
                .size_label,
            "0.02 KB"
        );
    }

    #[test]
    fn missing_keys_render_placeholder() {
        let result = NormalizedResult::Many(vec![
            json!({"city": "Київ", "street": "Хрещатик"}),
            json!({"city": "Львів"}),
        ]);
        assert_eq!(
            Preview::from_result(&result),
            Preview::Table {
                columns: vec!["city".into(), "street".into()],
                rows: vec![
                    vec!["Київ".into(), "Хрещатик".into()],
                    vec!["Львів".into(), "null".into()],
                ],
            }
        );
    }

    #[test]
    fn single_record_renders_every_entry_including_normalized() {
        let result = NormalizedResult::Single(json!({"input": "Київ", "normalized": "<CITY> Київ </CITY>"}));
        assert_eq!(
            Preview::from_result(&result),
            Preview::KeyValue(vec![
                ("input".into(), "Київ".into()),
                ("normalized".into(), "<CITY> Київ </CITY>".into()),
            ])
        );
    }

    #[test]
    fn non_object_single_value_renders_one_entry() {
        let result = NormalizedResult::Single(json!("ok"));
        assert_eq!(
            Preview::from_result(&result),
            Preview::KeyValue(vec![("value".into(), "ok".into())])
        );
    }

    #[test]
    fn list_of_scalars_renders_index_entries() {
        let result = NormalizedResult::Many(vec![json!("a"), json!(2)]);
        assert_eq!(
            Preview::from_result(&result),
            Preview::KeyValue(vec![("0".into(), "a".into()), ("1".into(), "2".into())])
        );
    }

    #[test]
    fn empty_list_renders_no_entries() {
        let result = NormalizedResult::Many(Vec::new());
        assert_eq!(Preview::from_result(&result), Preview::KeyValue(Vec::new()));
    }
}
