// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Nonce sequencing for a single sender.
//!
//! Nonces handed out by one [`NonceManager`] are strictly increasing and gap-free relative to the
//! sender's transaction count when the manager first queried it. The manager assumes it is the
//! only writer for its sender; two runners sharing a sender will collide.

use alloy::{primitives::Address, providers::Provider};

use super::network::NetworkError;
use crate::utils::color::DebugColor;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum NonceStrategy {
    /// Query the node before every submission
    #[default]
    Refetch,
    /// Query once, then count locally
    Sequential,
}

#[derive(Debug, Default)]
pub struct NonceManager {
    strategy: NonceStrategy,
    last_used: Option<u64>,
}

impl NonceManager {
    pub fn new(strategy: NonceStrategy) -> Self {
        Self {
            strategy,
            last_used: None,
        }
    }

    /// Nonce of the last transaction accepted by the node, if any.
    pub fn last_used(&self) -> Option<u64> {
        self.last_used
    }

    /// Returns the nonce for the next submission from `sender`.
    ///
    /// This does not reserve the nonce; call [`NonceManager::mark_used`] once the node accepted
    /// the transaction.
    pub async fn next_nonce(
        &self,
        sender: Address,
        provider: &impl Provider,
    ) -> Result<u64, NetworkError> {
        let nonce = match (self.strategy, self.last_used) {
            (NonceStrategy::Sequential, Some(last)) => last + 1,
            _ => {
                let onchain = provider.get_transaction_count(sender).pending().await?;
                debug!(@grey, "onchain nonce for {sender}: {}", onchain.debug_lavender());
                reconcile(onchain, self.last_used)
            }
        };
        Ok(nonce)
    }

    /// Records a nonce consumed by a broadcast transaction.
    pub fn mark_used(&mut self, nonce: u64) {
        self.last_used = Some(self.last_used.map_or(nonce, |last| last.max(nonce)));
    }
}

/// Keeps nonces monotonic when a node lags behind transactions it already accepted.
fn reconcile(onchain: u64, last_used: Option<u64>) -> u64 {
    match last_used {
        Some(last) if onchain <= last => last + 1,
        _ => onchain,
    }
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::{address, U64},
        providers::ProviderBuilder,
        transports::mock::Asserter,
    };

    use super::*;

    const SENDER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

    #[test]
    fn reconcile_never_goes_backwards() {
        assert_eq!(reconcile(5, None), 5);
        assert_eq!(reconcile(5, Some(3)), 5);
        assert_eq!(reconcile(5, Some(5)), 6);
        assert_eq!(reconcile(4, Some(7)), 8);
    }

    #[tokio::test]
    async fn refetch_queries_every_time() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        let mut nonces = NonceManager::new(NonceStrategy::Refetch);

        asserter.push_success(&U64::from(3));
        let first = nonces.next_nonce(SENDER, &provider).await.unwrap();
        assert_eq!(first, 3);
        nonces.mark_used(first);

        asserter.push_success(&U64::from(4));
        let second = nonces.next_nonce(SENDER, &provider).await.unwrap();
        assert_eq!(second, first + 1);
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn refetch_survives_lagging_node() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        let mut nonces = NonceManager::new(NonceStrategy::Refetch);
        nonces.mark_used(9);

        asserter.push_success(&U64::from(9));
        assert_eq!(nonces.next_nonce(SENDER, &provider).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn sequential_queries_once() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        let mut nonces = NonceManager::new(NonceStrategy::Sequential);

        asserter.push_success(&U64::from(0));
        let first = nonces.next_nonce(SENDER, &provider).await.unwrap();
        nonces.mark_used(first);
        // No response queued: a second RPC call would fail.
        let second = nonces.next_nonce(SENDER, &provider).await.unwrap();
        assert_eq!((first, second), (0, 1));
    }

    #[tokio::test]
    async fn unreachable_node_is_a_network_error() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        let nonces = NonceManager::default();

        asserter.push_failure_msg("connection refused");
        let err = nonces.next_nonce(SENDER, &provider).await.unwrap_err();
        assert!(matches!(err, NetworkError::Rpc(_)));
    }
}
