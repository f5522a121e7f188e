// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{path::PathBuf, time::Duration};

use alloy::primitives::Address;
use deploy_tools::{
    core::{
        artifact::{read_artifact, ArtifactError},
        chain::NetworkPreset,
        compile::{CompileConfig, DEFAULT_ARTIFACT_PATH, DEFAULT_SOLC_VERSION},
        config::{ConfigError, ReadTarget, ResolveError, ResolvedTarget, TargetConfig},
        contract::ContractHandle,
        network::{NetworkClient, ReadClient},
        nonce::NonceStrategy,
        signer::KeySource,
        transaction::TxConfig,
    },
    ops::{self, run::DEFAULT_SOURCE_PATH},
};

use crate::{
    constants::{DEFAULT_CONTRACT_NAME, DEFAULT_NETWORK, DEFAULT_SOURCE_NAME},
    utils::convert_gwei_to_wei,
};

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    /// File path to a text file containing a hex-encoded private key
    #[arg(long, env = "PRIVATE_KEY_PATH")]
    private_key_path: Option<PathBuf>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long, env = "KEYSTORE_PATH")]
    keystore_path: Option<PathBuf>,
    /// Keystore password file
    #[arg(long, env = "KEYSTORE_PASSWORD_PATH")]
    keystore_password_path: Option<PathBuf>,
    /// Expected sender address; must match the key
    #[arg(long, env = "DEPLOY_SENDER_ADDRESS")]
    sender: Option<Address>,
}

impl AuthArgs {
    /// The configured key source. An inline key wins over a key file, which wins over a keystore.
    ///
    /// A blank inline key, as left by an unfilled `.env`, counts as unset.
    pub fn key_source(&self) -> Option<KeySource> {
        let inline = self.private_key.as_ref().filter(|key| !key.trim().is_empty());
        if let Some(key) = inline {
            return Some(KeySource::PrivateKey(key.clone()));
        }
        if let Some(path) = &self.private_key_path {
            return Some(KeySource::PrivateKeyFile(path.clone()));
        }
        self.keystore_path.as_ref().map(|path| KeySource::Keystore {
            path: path.clone(),
            password_path: self.keystore_password_path.clone(),
        })
    }
}

#[derive(Debug, clap::Args)]
pub struct CompileArgs {
    /// Solidity source file to compile
    #[arg(long, default_value = DEFAULT_SOURCE_PATH)]
    pub source: PathBuf,
    /// Contract to extract from the source (defaults to the file name without extension)
    #[arg(long)]
    contract: Option<String>,
    /// Path or name of the solc executable
    #[arg(long, default_value = "solc")]
    solc: PathBuf,
    /// Version solc must report
    #[arg(long, env = "SOLC_VERSION", default_value = DEFAULT_SOLC_VERSION)]
    solc_version: String,
    /// Accept whatever version solc reports
    #[arg(long)]
    any_solc_version: bool,
    /// Where to write the compiler output
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    artifact_out: PathBuf,
}

impl CompileArgs {
    pub fn config(&self) -> CompileConfig {
        CompileConfig {
            solc: self.solc.clone(),
            solc_version: (!self.any_solc_version).then(|| self.solc_version.clone()),
            contract_name: self.contract.clone(),
            artifact_path: Some(self.artifact_out.clone()),
        }
    }
}

/// Selects a contract that was already compiled and deployed.
#[derive(Debug, clap::Args)]
pub struct ContractArgs {
    /// Address of the deployed contract
    #[arg(long)]
    address: Address,
    /// Compiler output holding the contract's ABI
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    artifact: PathBuf,
    /// Source the contract was compiled from, as named in the compiler output
    #[arg(long, default_value = DEFAULT_SOURCE_NAME)]
    source_name: String,
    /// Contract name within the source
    #[arg(long, default_value = DEFAULT_CONTRACT_NAME)]
    contract: String,
}

impl ContractArgs {
    pub fn handle(&self) -> Result<ContractHandle, ArtifactError> {
        let artifact = read_artifact(&self.artifact, &self.source_name, &self.contract)?;
        Ok(ContractHandle::new(self.address, artifact.abi))
    }
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// Well-known network supplying a default endpoint and chain id
    #[arg(long, value_enum, env = "DEPLOY_NETWORK", default_value_t = DEFAULT_NETWORK)]
    network: NetworkPreset,
    /// RPC endpoint, overriding the network's default
    #[arg(short, long, env = "DEPLOY_RPC_URL")]
    endpoint: Option<String>,
    /// Chain id, overriding the network's default
    #[arg(long, env = "DEPLOY_CHAIN_ID")]
    chain_id: Option<u64>,
    /// How nonces are obtained for successive transactions
    #[arg(long, value_enum, default_value_t = NonceStrategy::Refetch)]
    pub nonce_strategy: NonceStrategy,
}

impl ProviderArgs {
    pub fn target(&self, auth: &AuthArgs) -> TargetConfig {
        TargetConfig {
            preset: Some(self.network),
            endpoint: self.endpoint.clone(),
            chain_id: self.chain_id,
            sender: auth.sender,
            key: auth.key_source(),
        }
    }

    pub fn resolve(&self, auth: &AuthArgs) -> Result<ResolvedTarget, ResolveError> {
        self.target(auth).resolve()
    }

    pub async fn connect(&self, resolved: ResolvedTarget) -> deploy_tools::Result<NetworkClient> {
        ops::connect(resolved, self.nonce_strategy).await
    }

    pub fn resolve_read(&self, auth: &AuthArgs) -> Result<ReadTarget, ConfigError> {
        self.target(auth).resolve_read()
    }

    pub async fn connect_read(&self, target: ReadTarget) -> deploy_tools::Result<ReadClient> {
        ops::connect_read(target).await
    }
}

#[derive(Debug, clap::Args)]
pub struct TxArgs {
    /// Gas price in gwei; queried from the node when unset
    #[arg(long)]
    gas_price_gwei: Option<String>,
    /// Gas limit; estimated by the node when unset
    #[arg(long)]
    gas_limit: Option<u64>,
    /// Seconds to wait for a receipt before giving up
    #[arg(long, default_value_t = 120)]
    receipt_timeout: u64,
}

impl TxArgs {
    pub fn config(&self) -> Result<TxConfig, ConfigError> {
        let gas_price_wei = self
            .gas_price_gwei
            .as_deref()
            .map(|value| {
                convert_gwei_to_wei(value).map_err(|err| ConfigError::InvalidGasPrice {
                    value: value.to_string(),
                    reason: err.to_string(),
                })
            })
            .transpose()?;
        Ok(TxConfig {
            gas_price_wei,
            gas_limit: self.gas_limit,
            receipt_timeout: Duration::from_secs(self.receipt_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        auth: AuthArgs,
        #[command(flatten)]
        provider: ProviderArgs,
        #[command(flatten)]
        tx: TxArgs,
    }

    #[test]
    fn inline_key_wins() {
        let cli = Cli::parse_from([
            "test",
            "--private-key",
            "0x01",
            "--private-key-path",
            "key.txt",
        ]);
        assert!(matches!(
            cli.auth.key_source(),
            Some(KeySource::PrivateKey(key)) if key == "0x01"
        ));
    }

    #[test]
    fn blank_inline_key_is_unset() {
        let cli = Cli::parse_from(["test", "--private-key", " ", "--private-key-path", "key.txt"]);
        assert!(matches!(
            cli.auth.key_source(),
            Some(KeySource::PrivateKeyFile(path)) if path == PathBuf::from("key.txt")
        ));

        let cli = Cli::parse_from(["test", "--private-key", ""]);
        assert!(cli.auth.key_source().is_none());
    }

    #[test]
    fn keystore_takes_password_file() {
        let cli = Cli::parse_from([
            "test",
            "--keystore-path",
            "wallet.json",
            "--keystore-password-path",
            "password.txt",
        ]);
        match cli.auth.key_source() {
            Some(KeySource::Keystore {
                path,
                password_path,
            }) => {
                assert_eq!(path, PathBuf::from("wallet.json"));
                assert_eq!(password_path, Some(PathBuf::from("password.txt")));
            }
            other => panic!("unexpected key source: {other:?}"),
        }
    }

    #[test]
    fn explicit_endpoint_overrides_network() {
        let cli = Cli::parse_from([
            "test",
            "--network",
            "anvil",
            "--endpoint",
            "http://node:8545",
            "--nonce-strategy",
            "sequential",
        ]);
        let target = cli.provider.target(&cli.auth);
        assert_eq!(target.preset, Some(NetworkPreset::Anvil));
        assert_eq!(target.endpoint.as_deref(), Some("http://node:8545"));
        assert_eq!(cli.provider.nonce_strategy, NonceStrategy::Sequential);
    }

    #[test]
    fn tx_config_from_flags() {
        let cli = Cli::parse_from([
            "test",
            "--gas-price-gwei",
            "20",
            "--gas-limit",
            "6721975",
            "--receipt-timeout",
            "30",
        ]);
        let config = cli.tx.config().unwrap();
        assert_eq!(config.gas_price_wei, Some(20_000_000_000));
        assert_eq!(config.gas_limit, Some(6_721_975));
        assert_eq!(config.receipt_timeout, Duration::from_secs(30));
    }

    #[test]
    fn bad_gas_price_is_a_config_error() {
        let cli = Cli::parse_from(["test", "--gas-price-gwei", "cheap"]);
        assert!(matches!(
            cli.tx.config(),
            Err(ConfigError::InvalidGasPrice { value, .. }) if value == "cheap"
        ));
    }
}
