// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use deploy_tools::ops;

use crate::{common_args::CompileArgs, error::RunnerResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Print the contract's JSON ABI.
    #[arg(long)]
    abi: bool,
    /// Write the JSON ABI to this file instead of stdout. Implies --abi.
    #[arg(long)]
    abi_out: Option<PathBuf>,

    #[command(flatten)]
    compile: CompileArgs,
}

pub fn exec(args: Args) -> RunnerResult {
    let artifact = ops::compile(&args.compile.source, &args.compile.config())?;
    if args.abi || args.abi_out.is_some() {
        ops::export_abi(&artifact, args.abi_out.as_deref())?;
    }
    Ok(())
}
