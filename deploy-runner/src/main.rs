// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! CLI for `deploy-runner`.

use std::process::ExitCode;

use clap::Parser;

mod commands;
mod common_args;
mod constants;
mod error;
mod utils;

#[derive(Debug, Parser)]
#[command(name = "deploy-runner")]
#[command(author = "Offchain Labs, Inc.")]
#[command(about = "Compile, deploy and exercise Solidity contracts", long_about = None)]
#[command(propagate_version = true)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: commands::Command,

    /// Whether to print debug info.
    #[arg(long, global = true)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Settings in a local .env file feed the `env` fallbacks of the arguments below
    dotenv::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(err) = simple_logger::init_with_level(log_level) {
        utils::print_error(err);
        return ExitCode::FAILURE;
    }

    // Build async runtime and block on command execution
    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(Into::into)
        .and_then(|rt| rt.block_on(commands::exec(args.command)));

    // Report any error and return proper exit code
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            utils::print_error(&err);
            if let Some(kind) = err.kind() {
                utils::print_note(format!("{kind} stage failed"));
            }
            err.exit_code()
        }
    }
}
