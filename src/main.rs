mod input;
mod logging;
mod metrics;
mod model;
mod pipeline;
mod report;
mod router;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::input::{pack, untar};
use crate::pipeline::stage3_submission::score_submission;
use crate::report::update_json;

const GROUNDTRUTH_FOLDER: &str = "groundtruths";
const PREDICTIONS_FOLDER: &str = "predictions";

#[derive(Debug, Parser)]
#[command(name = "ctf-score", version, about = "Score dynamical-systems forecasting submissions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a predictions archive against a ground-truth archive.
    Run(RunArgs),
    /// Bundle the files of a directory into a tar archive without the directory prefix.
    Pack {
        directory: PathBuf,
        archive: PathBuf,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Evaluation (task) id of the submission.
    #[arg(short = 'e', long, alias = "evaluation_id")]
    evaluation_id: String,
    /// Ground-truth tar archive.
    #[arg(short = 'g', long, alias = "groundtruth_path")]
    groundtruth_path: PathBuf,
    /// Predictions tar archive.
    #[arg(short = 'i', long, alias = "input_file")]
    input_file: PathBuf,
    /// Results JSON file, merged in place.
    #[arg(short = 'o', long, default_value = "results.json")]
    output: PathBuf,
    /// Where the extraction folders are created.
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    evaluation_id: String,
    groundtruth_archive: PathBuf,
    predictions_archive: PathBuf,
    results_path: PathBuf,
    groundtruth_dir: PathBuf,
    predictions_dir: PathBuf,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        Self {
            evaluation_id: args.evaluation_id,
            groundtruth_archive: args.groundtruth_path,
            predictions_archive: args.input_file,
            results_path: args.output,
            groundtruth_dir: args.work_dir.join(GROUNDTRUTH_FOLDER),
            predictions_dir: args.work_dir.join(PREDICTIONS_FOLDER),
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Run(args) => run_scoring(&RunConfig::from(args)),
        Command::Pack { directory, archive } => {
            let count = pack(&directory, &archive).map_err(|e| e.to_string())?;
            tracing::info!(count, archive = %archive.display(), "packed directory");
            Ok(())
        }
    }
}

fn run_scoring(config: &RunConfig) -> Result<(), String> {
    untar(&config.groundtruth_dir, &config.groundtruth_archive, None)
        .map_err(|e| e.to_string())?;

    let record = score_submission(
        &config.groundtruth_dir,
        &config.predictions_archive,
        &config.predictions_dir,
        &config.evaluation_id,
    );

    update_json(&config.results_path, &record).map_err(|e| e.to_string())?;
    println!("{}", record.score_status);
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
