// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use deploy_tools::{core::deployment::DeploymentConfig, ops};

use crate::{
    common_args::{AuthArgs, CompileArgs, ProviderArgs, TxArgs},
    error::RunnerResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// The constructor arguments.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    constructor_args: Vec<String>,

    #[command(flatten)]
    compile: CompileArgs,
    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
    #[command(flatten)]
    tx: TxArgs,
}

pub async fn exec(args: Args) -> RunnerResult {
    let config = DeploymentConfig {
        tx: args.tx.config()?,
        constructor_args: args.constructor_args,
    };
    let target = args.provider.resolve(&args.auth)?;
    let artifact = ops::compile(&args.compile.source, &args.compile.config())?;
    let mut client = args.provider.connect(target).await?;
    ops::deploy(&artifact, &mut client, &config).await?;
    Ok(())
}
