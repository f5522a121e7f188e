// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The full compile, deploy, read, write, read sequence.

use std::path::PathBuf;

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, TxHash},
    providers::Provider,
};
use typed_builder::TypedBuilder;

use crate::{
    core::{
        artifact::CompilationArtifact, compile::CompileConfig, config::TargetConfig,
        deployment::DeploymentConfig, network::NetworkClient, nonce::NonceStrategy,
    },
    ops, Result,
};

pub const DEFAULT_SOURCE_PATH: &str = "contracts/SimpleStorage.sol";
pub const DEFAULT_READ_FUNCTION: &str = "retrieve";
pub const DEFAULT_WRITE_FUNCTION: &str = "store";
pub const DEFAULT_WRITE_VALUE: &str = "15";

/// Defines a full run against one network target.
/// After setting the parameters, call [`run`] to perform it.
#[derive(Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct RunConfig {
    #[builder(default = PathBuf::from(DEFAULT_SOURCE_PATH))]
    source: PathBuf,
    compile: CompileConfig,

    #[builder(!default)]
    target: TargetConfig,
    nonce_strategy: NonceStrategy,
    deployment: DeploymentConfig,

    #[builder(default = DEFAULT_READ_FUNCTION.to_string())]
    read_function: String,
    #[builder(default = DEFAULT_WRITE_FUNCTION.to_string())]
    write_function: String,
    #[builder(default = vec![DEFAULT_WRITE_VALUE.to_string()])]
    write_args: Vec<String>,
}

/// What a run observed.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub address: Address,
    /// Read before the write
    pub initial: Vec<DynSolValue>,
    pub update_tx: TxHash,
    /// Read after the write
    pub updated: Vec<DynSolValue>,
}

/// Compiles, connects, then deploys and exercises the contract.
///
/// Configuration is resolved before anything else runs. Stops at the first failure; nothing is
/// attempted against a contract whose deployment failed.
pub async fn run(config: &RunConfig) -> Result<RunReport> {
    let target = config.target.resolve()?;
    let artifact = ops::compile(&config.source, &config.compile)?;
    let mut client = ops::connect(target, config.nonce_strategy).await?;
    exercise(&artifact, &mut client, config).await
}

/// Deploys an already compiled contract through `client`, then reads, writes and reads again.
pub async fn exercise<P: Provider>(
    artifact: &CompilationArtifact,
    client: &mut NetworkClient<P>,
    config: &RunConfig,
) -> Result<RunReport> {
    let handle = ops::deploy(artifact, client, &config.deployment).await?;
    let initial = ops::read(&handle, &config.read_function, &[], &*client).await?;
    let receipt = ops::write(
        &handle,
        &config.write_function,
        &config.write_args,
        client,
        &config.deployment.tx,
    )
    .await?;
    let updated = ops::read(&handle, &config.read_function, &[], &*client).await?;

    Ok(RunReport {
        address: handle.address,
        initial,
        update_tx: receipt.transaction_hash,
        updated,
    })
}
