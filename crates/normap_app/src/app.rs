use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use engine_logging::{engine_debug, engine_info, engine_warn};
use indicatif::{ProgressBar, ProgressStyle};
use normap_core::{update, AppState, AppViewModel, InputMode, Msg, Phase};
use normap_engine::{EngineEvent, EngineHandle};
use owo_colors::OwoColorize;

use crate::cli::{Cli, Command, DownloadArgs};
use crate::config::Settings;
use crate::effects::EffectRunner;
use crate::files::select_file;
use crate::ui;

const BUSY_MESSAGE: &str = "Обробка...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
    /// Nothing was sent: the input was empty.
    Refused,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Succeeded => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::from(1),
            Outcome::Refused => ExitCode::from(2),
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let settings = Settings::resolve(cli.backend_url.as_deref(), cli.timeout_secs)?;
    engine_info!("Using normalization service at {}", settings.submit.base_url);

    match cli.command {
        Command::Text { text, download } => {
            let text = read_text_arg(text)?;
            let setup = vec![Msg::ModeSelected(InputMode::Text), Msg::TextChanged(text)];
            submit(settings, setup, download)
        }
        Command::File { path, download } => {
            let file = select_file(&path)?;
            let setup = vec![
                Msg::ModeSelected(InputMode::File),
                Msg::FileSelected(Some(file)),
            ];
            submit(settings, setup, download)
        }
        Command::Predict { text, json } => predict(settings, &read_text_arg(text)?, json),
    }
}

/// Owns the state machine and feeds every message through `update`.
struct Session {
    state: AppState,
    runner: EffectRunner,
    color: bool,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            color: io::stdout().is_terminal(),
        }
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            engine_debug!("phase={:?} mode={:?}", state.phase(), state.mode());
        }
        self.state = state;

        for path in self.runner.run(effects).context("saving result file")? {
            let line = format!("Збережено: {}", path.display());
            if self.color {
                println!("{}", line.green());
            } else {
                println!("{line}");
            }
        }
        Ok(())
    }
}

fn submit(settings: Settings, setup: Vec<Msg>, download: DownloadArgs) -> anyhow::Result<Outcome> {
    let runner = EffectRunner::new(settings.submit, download.output_dir);
    let mut session = Session::new(runner);
    for msg in setup {
        session.dispatch(msg)?;
    }

    if !session.view().submit_enabled {
        engine_warn!("Nothing to submit");
        eprintln!("normap: nothing to submit");
        return Ok(Outcome::Refused);
    }

    session.dispatch(Msg::SubmitClicked)?;
    let spinner = busy_spinner();
    while let Some(attempt) = session.state.in_flight() {
        let msg = session.runner.wait_for(attempt);
        session.dispatch(msg)?;
    }
    spinner.finish_and_clear();

    print!("{}", ui::render::render(&session.view(), session.color));

    match session.state.phase() {
        Phase::Succeeded => {
            if !download.no_download {
                session.dispatch(Msg::DownloadRequested)?;
            }
            Ok(Outcome::Succeeded)
        }
        Phase::Failed => Ok(Outcome::Failed),
        Phase::Idle | Phase::Submitting => Ok(Outcome::Refused),
    }
}

fn predict(settings: Settings, text: &str, json: bool) -> anyhow::Result<Outcome> {
    if text.trim().is_empty() {
        eprintln!("normap: nothing to submit");
        return Ok(Outcome::Refused);
    }

    let engine = EngineHandle::new(settings.submit);
    engine.predict(text);
    let spinner = busy_spinner();
    let event = engine.recv();
    spinner.finish_and_clear();

    match event {
        Some(EngineEvent::PredictionCompleted {
            result: Ok(prediction),
        }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                println!("{}", prediction.normalized);
            }
            Ok(Outcome::Succeeded)
        }
        Some(EngineEvent::PredictionCompleted { result: Err(err) }) => {
            engine_warn!("Prediction failed: {}", err);
            eprintln!("{}", normap_core::SUBMISSION_ERROR_MESSAGE);
            Ok(Outcome::Failed)
        }
        Some(EngineEvent::SubmissionCompleted { .. }) | None => {
            eprintln!("{}", normap_core::SUBMISSION_ERROR_MESSAGE);
            Ok(Outcome::Failed)
        }
    }
}

/// `-` means read the text from stdin.
fn read_text_arg(text: String) -> anyhow::Result<String> {
    if text != "-" {
        return Ok(text);
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading text from stdin")?;
    Ok(buffer)
}

fn busy_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(BUSY_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
