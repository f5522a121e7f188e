// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use deploy_tools::ops;

use crate::{
    common_args::{AuthArgs, ContractArgs, ProviderArgs},
    error::RunnerResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Function to call, e.g. `retrieve`
    function: String,
    /// Function arguments; pass negative numbers after `--`
    args: Vec<String>,

    #[command(flatten)]
    contract: ContractArgs,
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> RunnerResult {
    let target = args.provider.resolve_read(&args.auth)?;
    let handle = args.contract.handle()?;
    let client = args.provider.connect_read(target).await?;
    ops::read(&handle, &args.function, &args.args, &client).await?;
    Ok(())
}
