//! Plain-text rendering of the view model for the terminal.

use console::measure_text_width;
use normap_core::{AppViewModel, DownloadView, InputMode, Preview, SelectedFileView};
use owo_colors::OwoColorize;

pub const RESULT_TITLE: &str = "Результат (Попередній перегляд)";
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Title,
    Header,
    Error,
    Muted,
}

pub fn render(view: &AppViewModel, color: bool) -> String {
    let mut lines = Vec::new();

    if view.mode == InputMode::File {
        if let Some(file) = &view.selected_file {
            lines.push(paint(&file_line(file), Tone::Muted, color));
        }
    }

    if let Some(error) = &view.error {
        lines.push(paint(error, Tone::Error, color));
    }

    if let Some(preview) = &view.preview {
        lines.push(paint(RESULT_TITLE, Tone::Title, color));
        match preview {
            Preview::Table { columns, rows } => render_table(&mut lines, columns, rows, color),
            Preview::KeyValue(entries) => render_entries(&mut lines, entries, color),
        }
        if let Some(notice) = &view.hidden_records_notice {
            lines.push(paint(notice, Tone::Muted, color));
        }
    }

    if let Some(download) = &view.download {
        lines.push(download_line(download));
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn render_table(lines: &mut Vec<String>, columns: &[String], rows: &[Vec<String>], color: bool) {
    let headers: Vec<String> = columns.iter().map(|column| column.to_uppercase()).collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| measure_text_width(cell))
                .chain(std::iter::once(measure_text_width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| paint(&pad(header, *width), Tone::Header, color))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    lines.push(header_line.trim_end().to_string());

    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    lines.push(paint(&rule, Tone::Muted, color));

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        lines.push(line.trim_end().to_string());
    }
}

fn render_entries(lines: &mut Vec<String>, entries: &[(String, String)], color: bool) {
    let keys: Vec<String> = entries.iter().map(|(key, _)| key.to_uppercase()).collect();
    let width = keys.iter().map(|key| measure_text_width(key)).max().unwrap_or(0);
    for (key, (_, value)) in keys.iter().zip(entries) {
        let key = paint(&pad(key, width), Tone::Header, color);
        lines.push(format!("{key}{COLUMN_GAP}{value}"));
    }
}

fn file_line(file: &SelectedFileView) -> String {
    format!("{} ({})", file.name, file.size_label)
}

fn download_line(download: &DownloadView) -> String {
    format!(
        "Завантажити {}: {} ({} B)",
        download.label, download.file_name, download.byte_len
    )
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(text));
    format!("{text}{}", " ".repeat(fill))
}

fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Title => text.bold().to_string(),
        Tone::Header => text.cyan().to_string(),
        Tone::Error => text.red().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use normap_core::{update, AppState, Effect, Msg, SelectedFile, SUBMISSION_ERROR_MESSAGE};
    use serde_json::{json, Value};

    fn view_after(response: Option<Value>) -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::TextChanged("Київ".into()));
        let (state, effects) = update(state, Msg::SubmitClicked);
        let attempt = match effects.as_slice() {
            [Effect::Submit { attempt, .. }] => *attempt,
            other => panic!("unexpected effects {other:?}"),
        };
        let msg = match response {
            Some(response) => Msg::SubmissionSucceeded { attempt, response },
            None => Msg::SubmissionFailed { attempt },
        };
        update(state, msg).0.view()
    }

    #[test]
    fn table_columns_are_aligned_with_null_placeholders() {
        let view = view_after(Some(json!({
            "results": [
                {"city": "Київ", "street": "Хрещатик", "original": "Київ Хрещатик"},
                {"city": "Біла Церква", "original": "Біла Церква"}
            ]
        })));

        let expected = "\
Результат (Попередній перегляд)
CITY         STREET    ORIGINAL
-----------  --------  -------------
Київ         Хрещатик  Київ Хрещатик
Біла Церква  null      Біла Церква
";
        let rendered = render(&view, false);
        assert!(rendered.starts_with(expected), "{rendered}");
        assert!(rendered.contains("Завантажити повний файл: normalized.json ("));
    }

    #[test]
    fn single_record_renders_key_value_lines() {
        let view = view_after(Some(json!({
            "input": "м. Київ, вул Хрещатик 1",
            "normalized": "<CITY> Київ </CITY> <STREET> Хрещатик </STREET> 1"
        })));

        let rendered = render(&view, false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], RESULT_TITLE);
        assert_eq!(lines[1], "INPUT       м. Київ, вул Хрещатик 1");
        assert_eq!(
            lines[2],
            "NORMALIZED  <CITY> Київ </CITY> <STREET> Хрещатик </STREET> 1"
        );
        assert!(lines[3].starts_with("Завантажити файл: normalized.json"));
    }

    #[test]
    fn entry_keys_align_after_uppercasing() {
        let view = view_after(Some(json!({"straße": "Хрещатик", "stadt": "Київ"})));

        let rendered = render(&view, false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "STRASSE  Хрещатик");
        assert_eq!(lines[2], "STADT    Київ");
    }

    #[test]
    fn selected_file_is_listed_with_its_size() {
        let file = SelectedFile::new("адреси.csv", "text/csv", b"city\nKyiv\n".to_vec());
        let (state, _) = update(AppState::new(), Msg::ModeSelected(InputMode::File));
        let (state, _) = update(state, Msg::FileSelected(Some(file)));

        assert_eq!(render(&state.view(), false), "адреси.csv (0.01 KB)\n");
    }

    #[test]
    fn selected_file_is_not_listed_in_text_mode() {
        let file = SelectedFile::new("адреси.csv", "text/csv", b"city\n".to_vec());
        let (state, _) = update(AppState::new(), Msg::ModeSelected(InputMode::File));
        let (state, _) = update(state, Msg::FileSelected(Some(file)));
        let (state, _) = update(state, Msg::ModeSelected(InputMode::Text));

        assert_eq!(render(&state.view(), false), "");
    }

    #[test]
    fn failure_renders_only_the_message() {
        let view = view_after(None);
        assert_eq!(render(&view, false), format!("{SUBMISSION_ERROR_MESSAGE}\n"));
    }

    #[test]
    fn idle_view_renders_nothing() {
        assert_eq!(render(&AppState::new().view(), false), "");
    }
}
