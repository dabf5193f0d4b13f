use std::path::PathBuf;

use engine_logging::{engine_error, engine_info, engine_warn};
use normap_core::{AttemptId, Effect, Msg, Payload};
use normap_engine::{
    ArtifactWriter, EngineEvent, EngineHandle, PersistError, SubmitSettings, UploadPayload,
};

/// Executes core effects against the engine and the filesystem.
pub struct EffectRunner {
    engine: EngineHandle,
    writer: ArtifactWriter,
}

impl EffectRunner {
    pub fn new(settings: SubmitSettings, output_dir: PathBuf) -> Self {
        Self {
            engine: EngineHandle::new(settings),
            writer: ArtifactWriter::new(output_dir),
        }
    }

    /// Runs effects in order and returns the paths of any saved artifacts.
    pub fn run(&self, effects: Vec<Effect>) -> Result<Vec<PathBuf>, PersistError> {
        let mut saved = Vec::new();
        for effect in effects {
            match effect {
                Effect::Submit { attempt, payload } => {
                    engine_info!(
                        "Submit attempt={} name={} bytes={}",
                        attempt,
                        payload.name,
                        payload.bytes.len()
                    );
                    self.engine.submit(attempt, map_payload(payload));
                }
                Effect::SaveDownload { file_name, bytes } => {
                    saved.push(self.writer.save(&file_name, &bytes)?);
                }
            }
        }
        Ok(saved)
    }

    /// Blocks for the engine's answer to `attempt` and turns it into a message.
    pub fn wait_for(&self, attempt: AttemptId) -> Msg {
        loop {
            let Some(event) = self.engine.recv() else {
                engine_error!("Engine stopped before attempt {} completed", attempt);
                return Msg::SubmissionFailed { attempt };
            };
            match event {
                EngineEvent::SubmissionCompleted {
                    attempt: done,
                    result,
                } => {
                    return match result {
                        Ok(response) => Msg::SubmissionSucceeded {
                            attempt: done,
                            response,
                        },
                        Err(err) => {
                            engine_warn!("Attempt {} failed: {}", done, err);
                            Msg::SubmissionFailed { attempt: done }
                        }
                    };
                }
                EngineEvent::PredictionCompleted { .. } => {
                    engine_warn!("Ignoring prediction result while waiting for an upload");
                }
            }
        }
    }
}

fn map_payload(payload: Payload) -> UploadPayload {
    UploadPayload {
        file_name: payload.name,
        media_type: payload.media_type,
        bytes: payload.bytes,
    }
}
