mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::{command, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let output_dir = cli.output_dir.as_deref();

    let result = match &cli.command {
        Commands::Matrix(args) => command::matrix(args, output_dir)
            .map(|filename| println!("File saved to `{}`", filename)),
        Commands::Rotate(args) => {
            command::rotate(args, output_dir).map(|(matrices, rotated)| {
                println!("File saved to `{}`", matrices);
                println!("File saved to `{}`", rotated);
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `--log-level` wins over `RUST_LOG`, which wins over `info`.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
