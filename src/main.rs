mod cli;

use clap::Parser;
use decent_rollback::error::user_message;
use decent_rollback::inputs::{running_in_github_ci, ProcessEnvironment};
use decent_rollback::report::{GithubReporter, Reporter};
use std::io::IsTerminal;
use std::process::ExitCode;

use cli::dispatch::dispatch;
use cli::types::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let in_ci = running_in_github_ci(&ProcessEnvironment);
    let reporter = GithubReporter::new(!in_ci && std::io::stdout().is_terminal());

    match dispatch(cli, &reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            reporter.error(&user_message(&err, in_ci));
            ExitCode::FAILURE
        }
    }
}
