// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Building, signing and submitting transactions.
//!
//! Every transaction moves through `BUILT -> SIGNED -> BROADCAST -> PENDING` and ends either
//! `CONFIRMED` or `REJECTED`. Nothing is retried: a rejected transaction is reported to the
//! caller, who must not continue as if it had succeeded.

use std::{fmt, time::Duration};

use alloy::{
    eips::eip2718::Encodable2718,
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, TxHash},
    providers::{PendingTransactionError, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::{RpcError, TransportErrorKind},
};

use super::{
    network::{NetworkClient, NetworkError},
    signer::SigningError,
};
use crate::utils::{color::DebugColor, format_gas_price};

/// Upper bound on waiting for a receipt unless configured otherwise.
pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone, Debug)]
pub struct TxConfig {
    /// Fixed legacy gas price; queried from the node when `None`.
    pub gas_price_wei: Option<u128>,
    /// Fixed gas limit; estimated by the node when `None`.
    pub gas_limit: Option<u64>,
    pub receipt_timeout: Duration,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self {
            gas_price_wei: None,
            gas_limit: None,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
        }
    }
}

/// What a transaction does once mined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Contract creation: init code followed by encoded constructor arguments
    Create(Bytes),
    /// Call into an existing contract
    Call { to: Address, input: Bytes },
}

/// Fully specified, unsigned transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionIntent {
    pub from: Address,
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub payload: Payload,
}

impl TransactionIntent {
    pub fn request(&self) -> TransactionRequest {
        let tx = with_payload(TransactionRequest::default().with_from(self.from), &self.payload);
        tx.with_chain_id(self.chain_id)
            .with_nonce(self.nonce)
            .with_gas_price(self.gas_price)
            .with_gas_limit(self.gas_limit)
    }
}

fn with_payload(tx: TransactionRequest, payload: &Payload) -> TransactionRequest {
    match payload {
        Payload::Create(code) => tx.with_deploy_code(code.clone()),
        Payload::Call { to, input } => tx.with_to(*to).with_input(input.clone()),
    }
}

/// Raw EIP-2718 transaction, ready for `eth_sendRawTransaction`.
#[derive(Clone, Debug)]
pub struct SignedTransaction {
    hash: TxHash,
    raw: Bytes,
}

impl SignedTransaction {
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxState {
    Built,
    Signed,
    Broadcast,
    Pending,
    Confirmed,
    Rejected,
}

impl TxState {
    fn can_advance_to(self, next: TxState) -> bool {
        use TxState::*;
        matches!(
            (self, next),
            (Built, Signed)
                | (Signed, Broadcast)
                | (Broadcast, Pending)
                | (Broadcast, Rejected)
                | (Pending, Confirmed)
                | (Pending, Rejected)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TxState::Confirmed | TxState::Rejected)
    }
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxState::Built => "BUILT",
            TxState::Signed => "SIGNED",
            TxState::Broadcast => "BROADCAST",
            TxState::Pending => "PENDING",
            TxState::Confirmed => "CONFIRMED",
            TxState::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

/// Tracks one transaction through its states, refusing skipped or backwards transitions.
#[derive(Debug)]
pub struct TxLifecycle {
    state: TxState,
}

impl Default for TxLifecycle {
    fn default() -> Self {
        Self {
            state: TxState::Built,
        }
    }
}

impl TxLifecycle {
    pub fn state(&self) -> TxState {
        self.state
    }

    pub fn advance(&mut self, next: TxState) -> Result<(), TransactionError> {
        if !self.state.can_advance_to(next) {
            return Err(TransactionError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!(@grey, "tx state: {} -> {}", self.state, next.lavender());
        self.state = next;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    Signing(#[from] SigningError),

    #[error(
        "no receipt for tx {} after {}s",
        .tx_hash.debug_red(),
        .timeout.as_secs()
    )]
    Timeout { tx_hash: TxHash, timeout: Duration },
    #[error("tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("invalid transaction state transition {from} -> {to}")]
    InvalidTransition { from: TxState, to: TxState },
}

impl From<RpcError<TransportErrorKind>> for TransactionError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        Self::Network(err.into())
    }
}

impl From<PendingTransactionError> for TransactionError {
    fn from(err: PendingTransactionError) -> Self {
        Self::Network(err.into())
    }
}

/// Fills in nonce, gas price and gas limit for a payload sent by the client's sender.
pub async fn prepare<P: Provider>(
    payload: Payload,
    client: &NetworkClient<P>,
    config: &TxConfig,
) -> Result<TransactionIntent, TransactionError> {
    let from = client.sender();
    let provider = client.provider();
    let nonce = client.nonces().next_nonce(from, provider).await?;
    let gas_price = match config.gas_price_wei {
        Some(wei) => wei,
        None => provider.get_gas_price().await?,
    };
    let gas_limit = match config.gas_limit {
        Some(limit) => limit,
        None => {
            let probe = with_payload(TransactionRequest::default().with_from(from), &payload);
            provider.estimate_gas(probe).await?
        }
    };
    debug!(@grey,
        "prepared tx nonce={} gas_price={} gas_limit={}",
        nonce.debug_lavender(),
        format_gas_price(gas_price).lavender(),
        gas_limit.debug_lavender()
    );
    Ok(TransactionIntent {
        from,
        chain_id: client.target().chain_id,
        nonce,
        gas_price,
        gas_limit,
        payload,
    })
}

/// Signs an intent. Deterministic for a given intent and key.
pub async fn sign(
    intent: &TransactionIntent,
    wallet: &EthereumWallet,
) -> Result<SignedTransaction, SigningError> {
    let envelope = intent
        .request()
        .build(wallet)
        .await
        .map_err(|err| SigningError::Sign(err.to_string()))?;
    Ok(SignedTransaction {
        hash: *envelope.tx_hash(),
        raw: envelope.encoded_2718().into(),
    })
}

/// Signs, broadcasts and waits for the receipt of an intent.
///
/// The nonce is recorded as used once the node accepts the transaction, whatever its outcome.
/// A mined transaction with a failed status is reported as [`TransactionError::Reverted`].
pub async fn submit<P: Provider>(
    intent: TransactionIntent,
    client: &mut NetworkClient<P>,
    config: &TxConfig,
) -> Result<TransactionReceipt, TransactionError> {
    let mut lifecycle = TxLifecycle::default();

    let signed = sign(&intent, client.wallet()).await?;
    lifecycle.advance(TxState::Signed)?;
    let tx_hash = signed.hash();

    lifecycle.advance(TxState::Broadcast)?;
    let pending = match client.provider().send_raw_transaction(signed.raw()).await {
        Ok(pending) => pending,
        Err(err) => {
            lifecycle.advance(TxState::Rejected)?;
            return Err(NetworkError::Rejected(err).into());
        }
    };
    client.nonces_mut().mark_used(intent.nonce);
    lifecycle.advance(TxState::Pending)?;
    debug!(@grey, "sent tx: {}", tx_hash.debug_lavender());

    let receipt = tokio::time::timeout(config.receipt_timeout, pending.get_receipt())
        .await
        .map_err(|_| TransactionError::Timeout {
            tx_hash,
            timeout: config.receipt_timeout,
        })??;

    if !receipt.status() {
        lifecycle.advance(TxState::Rejected)?;
        return Err(TransactionError::Reverted { tx_hash });
    }
    lifecycle.advance(TxState::Confirmed)?;
    debug!(@grey,
        "tx {} confirmed in block {} using {} gas",
        tx_hash.debug_lavender(),
        receipt.block_number.unwrap_or_default(),
        receipt.gas_used
    );
    Ok(receipt)
}

/// Prepares and submits a payload in one go.
pub async fn send<P: Provider>(
    payload: Payload,
    client: &mut NetworkClient<P>,
    config: &TxConfig,
) -> Result<TransactionReceipt, TransactionError> {
    let intent = prepare(payload, client, config).await?;
    submit(intent, client, config).await
}
