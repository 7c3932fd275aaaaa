use std::{io::IsTerminal, process::ExitCode};

use anyhow::Context as _;
use clap::Parser;
use gemma_cli::{
    app::{self, Stage},
    cli::{Cli, normalize_args},
    config::RunConfig,
    env::Env,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and are not failures.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", app::diagnostic(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let env = Env::load(cli.env_file.as_deref()).context(Stage::Configure)?;
    let config = RunConfig::from_cli(cli, &env).context(Stage::Configure)?;
    let provider = app::build_provider(&config).context(Stage::Configure)?;

    let mut stdout = std::io::stdout().lock();
    app::run(&config, provider, &mut stdout).await
}
