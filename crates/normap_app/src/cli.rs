use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use engine_logging::LogDestination;
use log::LevelFilter;

use crate::config::BACKEND_URL_ENV;

#[derive(Parser)]
#[command(name = "normap")]
#[command(about = "Normalize Ukrainian addresses with a NorMap service", version)]
pub struct Cli {
    /// Base URL of the normalization service (default: http://localhost:5000)
    #[arg(long, env = BACKEND_URL_ENV, global = true)]
    pub backend_url: Option<String>,

    /// Give up on a request after this many seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal, global = true)]
    pub log: LogTarget,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize pasted free text (`-` reads stdin)
    Text {
        text: String,

        #[command(flatten)]
        download: DownloadArgs,
    },

    /// Upload a .txt or .csv file for normalization
    File {
        path: PathBuf,

        #[command(flatten)]
        download: DownloadArgs,
    },

    /// Normalize one address through the single-text endpoint
    Predict {
        text: String,

        /// Print the raw JSON answer
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Clone)]
pub struct DownloadArgs {
    /// Directory for the full result file
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Only show the preview; do not save the result file
    #[arg(long)]
    pub no_download: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::default_file(),
            LogTarget::Both => LogDestination::Both(engine_logging::DEFAULT_LOG_FILE.into()),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}
