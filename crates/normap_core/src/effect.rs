use crate::{AttemptId, Payload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the payload to the upload endpoint.
    Submit { attempt: AttemptId, payload: Payload },
    /// Store the download artifact under its suggested name.
    SaveDownload { file_name: String, bytes: Vec<u8> },
}
