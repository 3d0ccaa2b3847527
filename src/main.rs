use std::process::ExitCode;

use authd::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => cli::serve::run(args).await.map(|_| ExitCode::SUCCESS),
        Command::Check(args) => cli::client::run_check(args).await.map(exit_code),
        Command::Status(args) => cli::client::run_status(args).await.map(exit_code),
        Command::GenerateKey(args) => cli::client::run_generate_key(args).map(|_| ExitCode::SUCCESS),
    }
}

/// Shell-friendly status: 0 for a positive answer, 1 otherwise
fn exit_code(positive: bool) -> ExitCode {
    if positive {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
