use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User switched between pasted text and file upload.
    ModeSelected(crate::InputMode),
    /// User edited the text input.
    TextChanged(String),
    /// File picker yielded a file, or the selection was removed.
    FileSelected(Option<crate::SelectedFile>),
    /// User pressed the submit button.
    SubmitClicked,
    /// The service answered an attempt with a JSON body.
    SubmissionSucceeded {
        attempt: crate::AttemptId,
        response: Value,
    },
    /// An attempt failed in transport, on HTTP status, or on JSON parsing.
    SubmissionFailed { attempt: crate::AttemptId },
    /// User asked for the full result file.
    DownloadRequested,
    /// Fallback for placeholder wiring.
    NoOp,
}
