// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::RunnerResult;

mod call;
mod compile;
mod deploy;
mod run;
mod send;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Call a view function of a deployed contract
    Call(call::Args),
    /// Compile a Solidity source with solc
    #[clap(visible_alias = "c")]
    Compile(compile::Args),
    /// Compile and deploy a contract
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Compile, deploy, then read, write and read the contract again
    #[clap(visible_alias = "r")]
    Run(run::Args),
    /// Send a state-changing transaction to a deployed contract
    #[clap(visible_alias = "s")]
    Send(send::Args),
}

pub async fn exec(cmd: Command) -> RunnerResult {
    match cmd {
        Command::Call(args) => call::exec(args).await,
        Command::Compile(args) => compile::exec(args),
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Run(args) => run::exec(args).await,
        Command::Send(args) => send::exec(args).await,
    }
}
