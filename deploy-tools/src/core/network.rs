// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Connection to an Ethereum-compatible node on behalf of one sender.

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{PendingTransactionError, Provider, RootProvider},
    signers::local::PrivateKeySigner,
    transports::{RpcError, TransportErrorKind},
};
use reqwest::Url;

use super::{
    config::{ConfigError, ReadTarget},
    nonce::{NonceManager, NonceStrategy},
};
use crate::utils::color::{Color, DebugColor};

/// Where transactions are sent, and by whom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkTarget {
    pub endpoint: Url,
    pub chain_id: u64,
    pub sender: Address,
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),
    #[error("pending transaction error: {0}")]
    PendingTransaction(#[from] PendingTransactionError),

    #[error("transaction rejected by node: {0}")]
    Rejected(RpcError<TransportErrorKind>),
    #[error(
        "chain id mismatch: configured {}, node reports {}",
        .expected.mint(),
        .actual.red()
    )]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Access to a node for `eth_call`s.
pub trait CallAccess {
    type Provider: Provider;

    fn provider(&self) -> &Self::Provider;

    /// Address to call from, if any.
    fn caller(&self) -> Option<Address>;
}

/// Fails unless `provider` serves `expected`.
async fn check_chain<P: Provider>(provider: &P, expected: u64) -> Result<(), NetworkError> {
    let actual = provider.get_chain_id().await?;
    if actual != expected {
        return Err(NetworkError::ChainMismatch { expected, actual });
    }
    debug!(@grey, "chain id: {}", actual.debug_lavender());
    Ok(())
}

/// Connection for reads only. Holds no key and never sends transactions.
#[derive(Debug)]
pub struct ReadClient<P = RootProvider> {
    provider: P,
    target: ReadTarget,
}

impl ReadClient {
    pub fn connect(target: ReadTarget) -> Self {
        let provider = RootProvider::new_http(target.endpoint.clone());
        Self::new(provider, target)
    }
}

impl<P: Provider> ReadClient<P> {
    pub fn new(provider: P, target: ReadTarget) -> Self {
        Self { provider, target }
    }

    pub async fn check_chain_id(&self) -> Result<(), NetworkError> {
        debug!(@grey, "connecting to RPC: {}", self.target.endpoint);
        check_chain(&self.provider, self.target.chain_id).await
    }

    pub fn target(&self) -> &ReadTarget {
        &self.target
    }
}

impl<P: Provider> CallAccess for ReadClient<P> {
    type Provider = P;

    fn provider(&self) -> &P {
        &self.provider
    }

    fn caller(&self) -> Option<Address> {
        self.target.caller
    }
}

/// Explicit handle on a node, the sender's wallet and its nonce sequence.
///
/// Every operation that talks to the network takes a client; there is no process-wide state.
#[derive(Debug)]
pub struct NetworkClient<P = RootProvider> {
    provider: P,
    target: NetworkTarget,
    wallet: EthereumWallet,
    nonces: NonceManager,
}

impl NetworkClient {
    /// Creates a client for an HTTP endpoint. No request is made until the first operation.
    pub fn connect(
        target: NetworkTarget,
        signer: PrivateKeySigner,
        strategy: NonceStrategy,
    ) -> Result<Self, ConfigError> {
        let provider = RootProvider::new_http(target.endpoint.clone());
        Self::new(provider, target, signer, strategy)
    }
}

impl<P: Provider> NetworkClient<P> {
    pub fn new(
        provider: P,
        target: NetworkTarget,
        signer: PrivateKeySigner,
        strategy: NonceStrategy,
    ) -> Result<Self, ConfigError> {
        if signer.address() != target.sender {
            return Err(ConfigError::SenderMismatch {
                configured: target.sender,
                signer: signer.address(),
            });
        }
        Ok(Self {
            provider,
            target,
            wallet: EthereumWallet::new(signer),
            nonces: NonceManager::new(strategy),
        })
    }

    /// Fails unless the node serves the configured chain.
    pub async fn check_chain_id(&self) -> Result<(), NetworkError> {
        debug!(@grey, "connecting to RPC: {}", self.target.endpoint);
        check_chain(&self.provider, self.target.chain_id).await
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn target(&self) -> &NetworkTarget {
        &self.target
    }

    pub fn sender(&self) -> Address {
        self.target.sender
    }

    pub fn wallet(&self) -> &EthereumWallet {
        &self.wallet
    }

    pub fn nonces(&self) -> &NonceManager {
        &self.nonces
    }

    pub fn nonces_mut(&mut self) -> &mut NonceManager {
        &mut self.nonces
    }
}

impl<P: Provider> CallAccess for NetworkClient<P> {
    type Provider = P;

    fn provider(&self) -> &P {
        &self.provider
    }

    fn caller(&self) -> Option<Address> {
        Some(self.target.sender)
    }
}
