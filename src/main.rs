//! enigma-task command line
//!
//! Runs the engine entry points against a task record and prints JSON on
//! stdout. Logs go to stderr, filtered by `RUST_LOG`.
//!
//! Usage:
//!   enigma-task task-data --seed 300348454218987061 --task-version 2
//!   enigma-task request-hint --record task.json --request '{"rotorIndex":0,"cellRank":4}'
//!   enigma-task grade --record task.json --answer answer.json

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tracing::debug;

use enigma_task::api::{self, TaskRecord};
use enigma_task::EngineConfig;

#[derive(Parser)]
#[command(name = "enigma-task")]
#[command(version)]
#[command(about = "Rotor cipher puzzle engine: task data, hints and grading")]
#[command(propagate_version = true)]
struct Cli {
    /// Engine configuration file (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the public data of a task
    TaskData(RecordArgs),

    /// Validate a hint request and print the updated record
    RequestHint {
        #[command(flatten)]
        record: RecordArgs,
        /// Hint request as JSON, e.g. {"rotorIndex":0,"cellRank":4}
        #[arg(long)]
        request: String,
    },

    /// Grade an answer file (`-` reads stdin)
    Grade {
        #[command(flatten)]
        record: RecordArgs,
        #[arg(long)]
        answer: PathBuf,
    },
}

#[derive(Args)]
struct RecordArgs {
    /// Stored task record (JSON), as persisted by the platform
    #[arg(long, conflicts_with_all = ["seed", "task_version", "hints"])]
    record: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Rotor set version (0 to 3)
    #[arg(long, default_value_t = 0)]
    task_version: u32,

    /// Requested hints as a JSON list
    #[arg(long)]
    hints: Option<String>,
}

impl RecordArgs {
    fn load(&self) -> anyhow::Result<TaskRecord> {
        if let Some(path) = &self.record {
            let json = read_input(path)?;
            return Ok(TaskRecord::from_json(&json)?);
        }
        let Some(seed) = self.seed else {
            bail!("either --record or --seed is required");
        };
        Ok(TaskRecord {
            hints_requested: self.hints.clone(),
            ..TaskRecord::new(seed, self.task_version)
        })
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("invalid configuration {}", path.display()))?,
        None => EngineConfig::default(),
    };
    debug!(?config, "engine configuration");

    let output: Value = match cli.command {
        Commands::TaskData(args) => {
            let record = args.load()?;
            serde_json::to_value(api::task_data(&record, &config)?)?
        }
        Commands::RequestHint { record, request } => {
            let record = record.load()?;
            let request: Value =
                serde_json::from_str(&request).context("hint request is not valid JSON")?;
            let granted = api::request_hint(&record, &request)?;
            json!({
                "hint": granted,
                "record": record.with_hint(granted)?,
            })
        }
        Commands::Grade { record, answer } => {
            let record = record.load()?;
            let answer = read_input(&answer)?;
            serde_json::to_value(api::grade_answer(&record, &answer, &config)?)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
