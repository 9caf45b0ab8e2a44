//! `dlcount` entry point.

use clap::Parser;

use dlcount_cli::{Cli, CliError, env, execute, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    logging::init(cli.verbose);

    if let Err(e) = run(&cli).await {
        tracing::error!("{e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    // Load credentials before anything reads the environment
    let loaded = env::load_env_file(&cli.env_file).map_err(|e| CliError::Config(format!("{e:#}")))?;
    if !loaded {
        tracing::debug!(path = %cli.env_file.display(), "No environment file");
    }

    execute(cli).await.map(|_| ())
}
