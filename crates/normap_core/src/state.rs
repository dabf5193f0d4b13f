use serde_json::Value;

use crate::view_model::{AppViewModel, DownloadView, Preview, SelectedFileView};
use crate::{
    build_payload, normalize, DownloadArtifact, NormalizedResult, Payload, SelectedFile,
    PREVIEW_LIMIT,
};

pub type AttemptId = u64;

/// The only failure text the user ever sees.
pub const SUBMISSION_ERROR_MESSAGE: &str = "Виникла помилка при обробці файлу. Спробуйте ще раз.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Per-session state. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    mode: InputMode,
    text: String,
    file: Option<SelectedFile>,
    phase: Phase,
    last_attempt: AttemptId,
    in_flight: Option<AttemptId>,
    source_name: Option<String>,
    result: Option<NormalizedResult>,
    artifact: Option<DownloadArtifact>,
    error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let submitting = self.phase == Phase::Submitting;
        let has_input = match self.mode {
            InputMode::Text => !self.text.trim().is_empty(),
            InputMode::File => self.file.is_some(),
        };

        AppViewModel {
            mode: self.mode,
            phase: self.phase,
            text: self.text.clone(),
            selected_file: self.file.as_ref().map(SelectedFileView::from_file),
            controls_enabled: !submitting,
            submit_enabled: !submitting && has_input,
            error: self.error.clone(),
            preview: self.result.as_ref().map(Preview::from_result),
            download: self.artifact.as_ref().map(|artifact| DownloadView {
                file_name: artifact.file_name.clone(),
                byte_len: artifact.bytes.len(),
                label: download_label(self.result.as_ref()).to_string(),
            }),
            total_records: self.result.as_ref().map(NormalizedResult::record_count),
            hidden_records_notice: self.result.as_ref().and_then(hidden_records_notice),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Attempt currently awaiting a response, if any.
    pub fn in_flight(&self) -> Option<AttemptId> {
        self.in_flight
    }

    pub fn result(&self) -> Option<&NormalizedResult> {
        self.result.as_ref()
    }

    pub fn artifact(&self) -> Option<&DownloadArtifact> {
        self.artifact.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns whether anything observable changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn select_mode(&mut self, mode: InputMode) {
        if self.phase == Phase::Submitting || self.mode == mode {
            return;
        }
        self.mode = mode;
        self.dirty = true;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        if self.phase == Phase::Submitting || self.text == text {
            return;
        }
        self.text = text;
        self.dirty = true;
    }

    pub(crate) fn select_file(&mut self, file: Option<SelectedFile>) {
        if self.phase == Phase::Submitting || self.file == file {
            return;
        }
        self.file = file;
        self.dirty = true;
    }

    /// Starts a new attempt, or refuses without touching anything.
    pub(crate) fn begin_submission(&mut self) -> Option<(AttemptId, Payload)> {
        if self.phase == Phase::Submitting {
            return None;
        }
        let payload = build_payload(self.mode, &self.text, self.file.as_ref())?;

        self.result = None;
        self.artifact = None;
        self.error = None;
        self.source_name = match self.mode {
            InputMode::File => Some(payload.name.clone()),
            InputMode::Text => None,
        };
        self.last_attempt += 1;
        self.in_flight = Some(self.last_attempt);
        self.phase = Phase::Submitting;
        self.dirty = true;

        Some((self.last_attempt, payload))
    }

    pub(crate) fn apply_success(&mut self, attempt: AttemptId, response: Value) {
        if !self.is_awaiting(attempt) {
            return;
        }
        self.in_flight = None;

        let result = normalize(response);
        match DownloadArtifact::build(&result, self.source_name.as_deref()) {
            Ok(artifact) => {
                self.result = Some(result);
                self.artifact = Some(artifact);
                self.error = None;
                self.phase = Phase::Succeeded;
            }
            Err(_) => self.fail(),
        }
        self.dirty = true;
    }

    pub(crate) fn apply_failure(&mut self, attempt: AttemptId) {
        if !self.is_awaiting(attempt) {
            return;
        }
        self.in_flight = None;
        self.fail();
        self.dirty = true;
    }

    fn is_awaiting(&self, attempt: AttemptId) -> bool {
        self.phase == Phase::Submitting && self.in_flight == Some(attempt)
    }

    fn fail(&mut self) {
        self.result = None;
        self.artifact = None;
        self.error = Some(SUBMISSION_ERROR_MESSAGE.to_string());
        self.phase = Phase::Failed;
    }
}

fn download_label(result: Option<&NormalizedResult>) -> &'static str {
    match result {
        Some(result) if result.is_list() => "повний файл",
        _ => "файл",
    }
}

fn hidden_records_notice(result: &NormalizedResult) -> Option<String> {
    let total = result.record_count();
    (result.is_list() && total > PREVIEW_LIMIT).then(|| {
        format!(
            "Показано {PREVIEW_LIMIT} з {total} записів. Завантажте файл для перегляду всіх результатів."
        )
    })
}
