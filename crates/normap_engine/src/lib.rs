//! NorMap engine: HTTP submission and effect IO.
mod client;
mod engine;
mod persist;
mod types;

pub use client::{
    ReqwestSubmitter, SubmitSettings, Submitter, DEFAULT_BACKEND_URL, PREDICT_PATH, UPLOAD_FIELD,
    UPLOAD_PATH,
};
pub use engine::EngineHandle;
pub use persist::{ensure_output_dir, ArtifactWriter, PersistError};
pub use types::{AttemptId, EngineEvent, FailureKind, Prediction, SubmitError, UploadPayload};
