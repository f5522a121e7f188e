// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::{
    core::{
        chain::NetworkPreset,
        config::{ReadTarget, ResolvedTarget},
        network::{NetworkClient, ReadClient},
        nonce::NonceStrategy,
    },
    utils::color::DebugColor,
    Result,
};

/// Connects to a resolved target and checks that it serves the configured chain.
pub async fn connect(resolved: ResolvedTarget, strategy: NonceStrategy) -> Result<NetworkClient> {
    let ResolvedTarget { target, signer } = resolved;
    let local = NetworkPreset::from_chain_id(target.chain_id).is_some_and(NetworkPreset::is_local);
    if !local {
        warn!(@yellow, "chain {} is not a local dev chain, transactions cost real gas", target.chain_id);
    }
    debug!(@grey, "sender address: {}", target.sender.debug_lavender());

    let client = NetworkClient::connect(target, signer, strategy)?;
    client.check_chain_id().await?;
    info!(@grey,
        "connected to {} (chain {})",
        client.target().endpoint.as_str().lavender(),
        client.target().chain_id
    );
    Ok(client)
}

/// Like [`connect`], for reads that need no key.
pub async fn connect_read(target: ReadTarget) -> Result<ReadClient> {
    let client = ReadClient::connect(target);
    client.check_chain_id().await?;
    info!(@grey,
        "connected to {} (chain {}, read only)",
        client.target().endpoint.as_str().lavender(),
        client.target().chain_id
    );
    Ok(client)
}
