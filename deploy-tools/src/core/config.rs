// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Resolving a [`NetworkTarget`] from presets, explicit settings and key material.

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use reqwest::Url;

use super::{
    chain::NetworkPreset,
    network::NetworkTarget,
    signer::{load_signer, KeySource, SigningError},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no RPC endpoint configured; pass --endpoint or set DEPLOY_RPC_URL")]
    MissingEndpoint,
    #[error("no chain id configured; pass --chain-id or set DEPLOY_CHAIN_ID")]
    MissingChainId,
    #[error(
        "no private key configured; set PRIVATE_KEY, or pass --private-key-path or --keystore-path"
    )]
    MissingKey,
    #[error("invalid RPC endpoint {endpoint}: {error}")]
    InvalidEndpoint {
        endpoint: String,
        error: String,
    },
    #[error("configured sender {configured} does not match the signer's address {signer}")]
    SenderMismatch { configured: Address, signer: Address },
    #[error("invalid gas price {value}: {reason}")]
    InvalidGasPrice { value: String, reason: String },
}

/// Unresolved network settings as collected from flags, environment and presets.
#[derive(Debug, Default)]
pub struct TargetConfig {
    pub preset: Option<NetworkPreset>,
    pub endpoint: Option<String>,
    pub chain_id: Option<u64>,
    pub sender: Option<Address>,
    pub key: Option<KeySource>,
}

/// Resolved target together with the signer that will pay for its transactions.
#[derive(Debug)]
pub struct ResolvedTarget {
    pub target: NetworkTarget,
    pub signer: PrivateKeySigner,
}

/// Endpoint and chain for calls that sign nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadTarget {
    pub endpoint: Url,
    pub chain_id: u64,
    /// Sent as `from` when set
    pub caller: Option<Address>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Signing(#[from] SigningError),
}

impl TargetConfig {
    /// Applies presets, loads the key and checks the sender against it.
    ///
    /// Explicit settings win over the preset. The sender defaults to the signer's address.
    pub fn resolve(&self) -> Result<ResolvedTarget, ResolveError> {
        let (endpoint, chain_id) = self.endpoint_and_chain()?;
        let key = self.key.as_ref().ok_or(ConfigError::MissingKey)?;
        let signer = load_signer(key, chain_id)?;

        let sender = match self.sender {
            Some(configured) if configured != signer.address() => {
                return Err(ConfigError::SenderMismatch {
                    configured,
                    signer: signer.address(),
                }
                .into())
            }
            Some(configured) => configured,
            None => signer.address(),
        };

        Ok(ResolvedTarget {
            target: NetworkTarget {
                endpoint,
                chain_id,
                sender,
            },
            signer,
        })
    }

    /// Resolves only what a read needs. Key material is neither required nor loaded.
    pub fn resolve_read(&self) -> Result<ReadTarget, ConfigError> {
        let (endpoint, chain_id) = self.endpoint_and_chain()?;
        Ok(ReadTarget {
            endpoint,
            chain_id,
            caller: self.sender,
        })
    }

    fn endpoint_and_chain(&self) -> Result<(Url, u64), ConfigError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .or_else(|| self.preset.and_then(NetworkPreset::endpoint))
            .ok_or(ConfigError::MissingEndpoint)?;
        let endpoint = endpoint
            .parse::<Url>()
            .map_err(|error| ConfigError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                error: error.to_string(),
            })?;
        let chain_id = self
            .chain_id
            .or_else(|| self.preset.map(NetworkPreset::chain_id))
            .ok_or(ConfigError::MissingChainId)?;
        Ok((endpoint, chain_id))
    }
}
