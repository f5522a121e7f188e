// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::providers::Provider;

use crate::{
    core::{
        artifact::CompilationArtifact,
        contract::ContractHandle,
        deployment::{self, DeploymentConfig},
        network::NetworkClient,
    },
    utils::color::DebugColor,
    Result,
};

pub async fn deploy<P: Provider>(
    artifact: &CompilationArtifact,
    client: &mut NetworkClient<P>,
    config: &DeploymentConfig,
) -> Result<ContractHandle> {
    greyln!("Deploying contract...");
    let handle = deployment::deploy(artifact, client, config).await?;
    mintln!("Deployed!");
    greyln!("contract address: {}", handle.address.debug_lavender());
    Ok(handle)
}
