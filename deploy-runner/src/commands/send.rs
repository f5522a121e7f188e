// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use deploy_tools::ops;

use crate::{
    common_args::{AuthArgs, ContractArgs, ProviderArgs, TxArgs},
    error::RunnerResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Function to call, e.g. `store`
    function: String,
    /// Function arguments; pass negative numbers after `--`
    args: Vec<String>,

    #[command(flatten)]
    contract: ContractArgs,
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
    #[command(flatten)]
    tx: TxArgs,
}

pub async fn exec(args: Args) -> RunnerResult {
    let config = args.tx.config()?;
    let target = args.provider.resolve(&args.auth)?;
    let handle = args.contract.handle()?;
    let mut client = args.provider.connect(target).await?;
    ops::write(&handle, &args.function, &args.args, &mut client, &config).await?;
    Ok(())
}
