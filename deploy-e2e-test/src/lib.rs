// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Dev node and fixtures for end-to-end tests.

use std::path::PathBuf;

use alloy::primitives::{address, Address};
use deploy_tools::{
    core::{
        artifact::CompilationArtifact,
        chain::{NetworkPreset, ANVIL_CHAIN_ID},
        compile::{self, CompileConfig, ContractSource},
        config::TargetConfig,
        network::NetworkClient,
        nonce::NonceStrategy,
        signer::KeySource,
    },
    ops,
    utils::sys,
};
use eyre::{Result, WrapErr};
use reqwest::{header::HeaderValue, Method, Response};
use testcontainers::{
    core::{wait::HttpWaitStrategy, IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

/// First pre-funded Anvil account.
pub const DEVNET_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEVNET_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

const ANVIL_IMAGE_NAME: &str = "ghcr.io/foundry-rs/foundry";
const ANVIL_IMAGE_TAG: &str = "v1.0.0";
const ANVIL_PORT: u16 = 8545;

/// Whether `solc` is on the path; compiling tests are skipped without it.
pub fn solc_available() -> bool {
    sys::command_exists("solc")
}

pub fn simple_storage_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../contracts/SimpleStorage.sol")
}

/// Compiler settings accepting whatever solc is installed, without writing any output.
pub fn compile_config() -> CompileConfig {
    CompileConfig {
        solc_version: None,
        artifact_path: None,
        ..Default::default()
    }
}

pub fn compile_simple_storage() -> Result<CompilationArtifact> {
    let source = ContractSource::read(simple_storage_path())?;
    Ok(compile::compile(&source, &compile_config())?)
}

/// Manage an Anvil dev node.
pub struct Node {
    _container: ContainerAsync<GenericImage>,
    rpc: String,
}

impl Node {
    /// Starts a new Anvil node in the background.
    /// This node will be shutdown when this struct is dropped.
    pub async fn new() -> Result<Self> {
        Self::start(&[]).await
    }

    /// Starts a node that accepts transactions but never mines them.
    pub async fn without_mining() -> Result<Self> {
        Self::start(&["--no-mining"]).await
    }

    async fn start(extra_args: &[&str]) -> Result<Self> {
        let mut cmd = vec!["--host", "0.0.0.0"];
        cmd.extend_from_slice(extra_args);
        let wait_strategy = HttpWaitStrategy::new("/")
            .with_port(ANVIL_PORT.into())
            .with_method(Method::POST)
            .with_header("Content-Type", HeaderValue::from_static("application/json"))
            .with_body(r#"{"jsonrpc":"2.0","method":"eth_chainId","params":[],"id":1}"#)
            .with_response_matcher_async(rpc_response_matcher);
        let container = GenericImage::new(ANVIL_IMAGE_NAME, ANVIL_IMAGE_TAG)
            .with_exposed_port(ANVIL_PORT.tcp())
            .with_wait_for(WaitFor::Http(wait_strategy))
            .with_entrypoint("anvil")
            .with_cmd(cmd)
            .start()
            .await
            .wrap_err("failed to start Anvil container")?;
        let port = container
            .get_host_port_ipv4(ANVIL_PORT)
            .await
            .wrap_err("failed to get Anvil RPC port")?;
        let rpc = format!("http://localhost:{port}");
        Ok(Node {
            _container: container,
            rpc,
        })
    }

    /// Network settings for the node, paid for by the first dev account.
    pub fn target(&self) -> TargetConfig {
        TargetConfig {
            preset: Some(NetworkPreset::Anvil),
            endpoint: Some(self.rpc.clone()),
            chain_id: Some(ANVIL_CHAIN_ID),
            sender: Some(DEVNET_ADDRESS),
            key: Some(KeySource::PrivateKey(DEVNET_PRIVATE_KEY.to_string())),
        }
    }

    /// Connects a client to the node.
    pub async fn client(&self, strategy: NonceStrategy) -> Result<NetworkClient> {
        let resolved = self.target().resolve()?;
        Ok(ops::connect(resolved, strategy).await?)
    }
}

async fn rpc_response_matcher(response: Response) -> bool {
    let Ok(text) = response.text().await else {
        return false;
    };
    text.contains("result")
}
