// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

#![cfg(feature = "integration-tests")]

use std::time::Duration;

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, Bytes, U256},
};
use deploy_e2e_test::{
    compile_config, compile_simple_storage, simple_storage_path, solc_available, Node,
};
use deploy_tools::{
    core::{
        contract::{call_read, call_write, ContractError},
        deployment::{deploy, DeploymentConfig},
        network::NetworkError,
        nonce::NonceStrategy,
        transaction::{self, Payload, TransactionError, TxConfig},
    },
    ops::{self, RunConfig},
    Error, ErrorKind,
};
use eyre::Result;
use pretty_assertions::assert_eq;

fn uint(value: u64) -> Vec<DynSolValue> {
    vec![DynSolValue::Uint(U256::from(value), 256)]
}

macro_rules! require_solc {
    () => {
        if !solc_available() {
            eprintln!("solc not installed, skipping");
            return Ok(());
        }
    };
}

#[tokio::test]
async fn deploy_then_read_and_write() -> Result<()> {
    require_solc!();
    let node = Node::new().await?;
    let artifact = compile_simple_storage()?;
    let mut client = node.client(NonceStrategy::Refetch).await?;

    let handle = deploy(&artifact, &mut client, &DeploymentConfig::default()).await?;
    assert_ne!(handle.address, Address::ZERO);
    assert_eq!(handle.abi, artifact.abi);

    let initial = call_read(&handle, "retrieve", &[], &client).await?;
    assert_eq!(initial, uint(0));

    let receipt = call_write(
        &handle,
        "store",
        &["15".to_string()],
        &mut client,
        &TxConfig::default(),
    )
    .await?;
    assert!(receipt.status());

    let updated = call_read(&handle, "retrieve", &[], &client).await?;
    assert_eq!(updated, uint(15));
    Ok(())
}

#[tokio::test]
async fn sequential_writes_use_consecutive_nonces() -> Result<()> {
    require_solc!();
    let node = Node::new().await?;
    let artifact = compile_simple_storage()?;

    for strategy in [NonceStrategy::Refetch, NonceStrategy::Sequential] {
        let mut client = node.client(strategy).await?;
        let handle = deploy(&artifact, &mut client, &DeploymentConfig::default()).await?;
        let deployed = client.nonces().last_used().unwrap_or_default();

        let mut used = vec![];
        for value in ["1", "2"] {
            call_write(
                &handle,
                "store",
                &[value.to_string()],
                &mut client,
                &TxConfig::default(),
            )
            .await?;
            used.extend(client.nonces().last_used());
        }
        assert_eq!(used, vec![deployed + 1, deployed + 2]);
    }
    Ok(())
}

#[tokio::test]
async fn stale_nonce_is_rejected_without_state_change() -> Result<()> {
    require_solc!();
    let node = Node::new().await?;
    let artifact = compile_simple_storage()?;
    let mut client = node.client(NonceStrategy::Refetch).await?;
    let handle = deploy(&artifact, &mut client, &DeploymentConfig::default()).await?;
    let last_used = client.nonces().last_used();

    let (_, input) = handle.encode_call("store", &["99".to_string()])?;
    let payload = Payload::Call {
        to: handle.address,
        input,
    };
    let mut intent = transaction::prepare(payload, &client, &TxConfig::default()).await?;
    intent.nonce = 0;

    let err = transaction::submit(intent, &mut client, &TxConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TransactionError::Network(NetworkError::Rejected(_))
    ));
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(client.nonces().last_used(), last_used);

    let value = call_read(&handle, "retrieve", &[], &client).await?;
    assert_eq!(value, uint(0));
    Ok(())
}

#[tokio::test]
async fn out_of_gas_write_is_reverted() -> Result<()> {
    require_solc!();
    let node = Node::new().await?;
    let artifact = compile_simple_storage()?;
    let mut client = node.client(NonceStrategy::Refetch).await?;
    let handle = deploy(&artifact, &mut client, &DeploymentConfig::default()).await?;
    let deployed = client.nonces().last_used();

    // Covers intrinsic gas but not the storage write.
    let config = TxConfig {
        gas_limit: Some(25_000),
        ..Default::default()
    };
    let err = call_write(&handle, "store", &["15".to_string()], &mut client, &config)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ContractError::Transaction(TransactionError::Reverted { .. })
    ));
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(client.nonces().last_used(), deployed.map(|nonce| nonce + 1));

    let value = call_read(&handle, "retrieve", &[], &client).await?;
    assert_eq!(value, uint(0));
    Ok(())
}

#[tokio::test]
async fn unmined_transaction_times_out() -> Result<()> {
    let node = Node::without_mining().await?;
    let mut client = node.client(NonceStrategy::Refetch).await?;

    let payload = Payload::Call {
        to: Address::repeat_byte(0x11),
        input: Bytes::new(),
    };
    let config = TxConfig {
        receipt_timeout: Duration::from_secs(1),
        ..Default::default()
    };
    let err = transaction::send(payload, &mut client, &config)
        .await
        .unwrap_err();
    assert!(matches!(err, TransactionError::Timeout { .. }));
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(client.nonces().last_used(), Some(0));
    Ok(())
}

#[tokio::test]
async fn wrong_chain_id_is_a_network_error() -> Result<()> {
    let node = Node::new().await?;
    let mut target = node.target();
    target.chain_id = Some(1337);

    let err = ops::connect(target.resolve()?, NonceStrategy::Refetch)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Network(NetworkError::ChainMismatch {
            expected: 1337,
            actual: 31337
        })
    ));
    Ok(())
}

#[tokio::test]
async fn run_stores_fifteen() -> Result<()> {
    require_solc!();
    let node = Node::new().await?;
    let config = RunConfig::builder()
        .source(simple_storage_path())
        .compile(compile_config())
        .target(node.target())
        .build();

    let report = ops::run(&config).await?;
    assert_ne!(report.address, Address::ZERO);
    assert_eq!(report.initial, uint(0));
    assert_eq!(report.updated, uint(15));
    Ok(())
}
