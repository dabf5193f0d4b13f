use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::client::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{AttemptId, EngineEvent, UploadPayload};

enum EngineCommand {
    Submit {
        attempt: AttemptId,
        payload: UploadPayload,
    },
    Predict {
        text: String,
    },
}

/// Runs submissions on a background tokio runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings) -> Self {
        Self::with_submitter(Arc::new(ReqwestSubmitter::new(settings)))
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(submitter.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, attempt: AttemptId, payload: UploadPayload) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { attempt, payload });
    }

    pub fn predict(&self, text: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Predict { text: text.into() });
    }

    /// Blocks until the next event; `None` once the worker is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Submit { attempt, payload } => EngineEvent::SubmissionCompleted {
            attempt,
            result: submitter.submit(attempt, payload).await,
        },
        EngineCommand::Predict { text } => EngineEvent::PredictionCompleted {
            result: submitter.predict(&text).await,
        },
    };
    let _ = event_tx.send(event);
}
