//! NorMap core: pure submission state machine, result shaping and view-model helpers.
mod artifact;
mod columns;
mod effect;
mod msg;
mod normalize;
mod payload;
mod state;
mod update;
mod view_model;

pub use artifact::{download_file_name, DownloadArtifact};
pub use columns::{compare_columns, order_columns, CANONICAL_COLUMNS, HIDDEN_COLUMN, TRAILING_COLUMN};
pub use effect::Effect;
pub use msg::Msg;
pub use normalize::{normalize, NormalizedResult, PREVIEW_LIMIT};
pub use payload::{
    build_payload, media_type_for, Payload, SelectedFile, CSV_MEDIA_TYPE, TEXT_MEDIA_TYPE,
    TEXT_PAYLOAD_NAME,
};
pub use state::{AppState, AttemptId, InputMode, Phase, SUBMISSION_ERROR_MESSAGE};
pub use update::update;
pub use view_model::{
    display_value, AppViewModel, DownloadView, Preview, SelectedFileView, NULL_PLACEHOLDER,
};
