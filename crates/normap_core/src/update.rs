use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ModeSelected(mode) => {
            state.select_mode(mode);
            Vec::new()
        }
        Msg::TextChanged(text) => {
            state.set_text(text);
            Vec::new()
        }
        Msg::FileSelected(file) => {
            state.select_file(file);
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Some((attempt, payload)) => vec![Effect::Submit { attempt, payload }],
            None => Vec::new(),
        },
        Msg::SubmissionSucceeded { attempt, response } => {
            state.apply_success(attempt, response);
            Vec::new()
        }
        Msg::SubmissionFailed { attempt } => {
            state.apply_failure(attempt);
            Vec::new()
        }
        Msg::DownloadRequested => match state.artifact() {
            Some(artifact) => vec![Effect::SaveDownload {
                file_name: artifact.file_name.clone(),
                bytes: artifact.bytes.clone(),
            }],
            None => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
