use anyhow::Result;
use ok_runner::config::{Args, RunConfig};
use ok_runner::discovery::{self, RunSummary};
use ok_runner::{Interpreter, ProcessRunner, logging};
use std::process::ExitCode;
use tracing::info;

fn run(args: Args) -> Result<RunSummary> {
    let config = RunConfig::from_args(args)?;
    let mut interpreter =
        Interpreter::new(ProcessRunner::new(config.env)).with_separators(config.separators);
    discovery::run_scripts(&config.pattern, config.directory.as_deref(), &mut interpreter)
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    logging::init();

    match run(args) {
        Ok(summary) => {
            info!(?summary, "run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ok: {e:#}");
            ExitCode::FAILURE
        }
    }
}
