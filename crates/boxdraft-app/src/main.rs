use std::path::PathBuf;
use std::process::ExitCode;

use boxdraft_app::{ReplayResult, document_json, load_config, load_script, replay};
use boxdraft_core::EditorConfig;
use clap::Parser;

/// Replay an editor command script and print the resulting document.
#[derive(Debug, Parser)]
#[clap(name = "boxdraft", version)]
struct Cli {
    /// JSON script of commands to replay.
    script: PathBuf,

    /// JSON file overriding editor thresholds.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: &Cli) -> ReplayResult<String> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::default(),
    };
    let script = load_script(&cli.script)?;
    let document = replay(script, config)?.into_document();
    document_json(&document)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Starting BoxDraft replay of {}", cli.script.display());

    match run(&cli) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("boxdraft: {e}");
            ExitCode::FAILURE
        }
    }
}
