// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use deploy_tools::{
    core::deployment::DeploymentConfig,
    ops::{
        self,
        run::{DEFAULT_READ_FUNCTION, DEFAULT_WRITE_FUNCTION, DEFAULT_WRITE_VALUE},
        RunConfig,
    },
};

use crate::{
    common_args::{AuthArgs, CompileArgs, ProviderArgs, TxArgs},
    error::RunnerResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// View function read before and after the update
    #[arg(long, default_value = DEFAULT_READ_FUNCTION)]
    read_function: String,
    /// State-changing function called once deployed
    #[arg(long, default_value = DEFAULT_WRITE_FUNCTION)]
    write_function: String,
    /// Arguments for the state-changing function
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
        default_value = DEFAULT_WRITE_VALUE,
    )]
    write_args: Vec<String>,
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
    let config = RunConfig::builder()
        .source(args.compile.source.clone())
        .compile(args.compile.config())
        .target(args.provider.target(&args.auth))
        .nonce_strategy(args.provider.nonce_strategy)
        .deployment(DeploymentConfig {
            tx: args.tx.config()?,
            constructor_args: args.constructor_args,
        })
        .read_function(args.read_function)
        .write_function(args.write_function)
        .write_args(args.write_args)
        .build();
    let report = ops::run(&config).await?;
    log::debug!("run report: {report:?}");
    Ok(())
}
