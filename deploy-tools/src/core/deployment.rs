// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use alloy::{
    dyn_abi::JsonAbiExt,
    primitives::{Bytes, TxHash},
    providers::Provider,
};

use super::{
    artifact::CompilationArtifact,
    contract::{coerce_args, ArgumentError, ContractHandle},
    network::NetworkClient,
    transaction::{self, Payload, TransactionError, TxConfig},
};
use crate::utils::color::DebugColor;

#[derive(Clone, Debug, Default)]
pub struct DeploymentConfig {
    pub tx: TxConfig,
    /// Constructor arguments, parsed against the constructor's ABI.
    pub constructor_args: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("{0}")]
    Transaction(#[from] TransactionError),

    #[error("invalid constructor: {0}")]
    InvalidConstructor(ArgumentError),
    #[error("deployment tx {} has no contract address", .tx_hash.debug_red())]
    MissingContractAddress { tx_hash: TxHash },
}

/// Init code for a deployment: the bytecode followed by the ABI-encoded constructor arguments.
pub fn deployment_code(
    artifact: &CompilationArtifact,
    constructor_args: &[String],
) -> Result<Bytes, DeploymentError> {
    let mut code = artifact.bytecode.to_vec();
    match &artifact.abi.constructor {
        Some(constructor) => {
            let values = coerce_args(&constructor.inputs, constructor_args)
                .map_err(DeploymentError::InvalidConstructor)?;
            let encoded = constructor
                .abi_encode_input_raw(&values)
                .map_err(|err| DeploymentError::InvalidConstructor(err.into()))?;
            code.extend(encoded);
        }
        None if !constructor_args.is_empty() => {
            return Err(DeploymentError::InvalidConstructor(ArgumentError::Arity {
                expected: 0,
                found: constructor_args.len(),
            }));
        }
        None => {}
    }
    Ok(code.into())
}

/// Deploys a compiled contract and returns a handle on it once the deployment is mined.
pub async fn deploy<P: Provider>(
    artifact: &CompilationArtifact,
    client: &mut NetworkClient<P>,
    config: &DeploymentConfig,
) -> Result<ContractHandle, DeploymentError> {
    let code = deployment_code(artifact, &config.constructor_args)?;
    debug!(@grey, "sender address: {}", client.sender().debug_lavender());
    debug!(@grey,
        "deploying {} ({} bytes of init code)",
        artifact.contract_name.lavender(),
        code.len()
    );

    let receipt = transaction::send(Payload::Create(code), client, &config.tx).await?;
    let tx_hash = receipt.transaction_hash;
    let address = receipt
        .contract_address
        .ok_or(DeploymentError::MissingContractAddress { tx_hash })?;
    info!(@grey, "deployed code at address: {}", address.debug_lavender());
    debug!(@grey, "deployment tx hash: {}", tx_hash.debug_lavender());

    Ok(ContractHandle::new(address, artifact.abi.clone()))
}

#[cfg(test)]
mod tests {
    use alloy::json_abi::JsonAbi;

    use super::*;
    use crate::core::artifact::{tests::SIMPLE_STORAGE_OUTPUT, CompilerOutput};

    fn simple_storage() -> CompilationArtifact {
        CompilerOutput::parse(SIMPLE_STORAGE_OUTPUT)
            .unwrap()
            .artifact("SimpleStorage.sol", "SimpleStorage")
            .unwrap()
    }

    fn with_constructor(mut artifact: CompilationArtifact) -> CompilationArtifact {
        artifact.abi = serde_json::from_str::<JsonAbi>(
            r#"[{
                "inputs": [
                    {"internalType": "uint256", "name": "initial", "type": "uint256"},
                    {"internalType": "address", "name": "owner", "type": "address"}
                ],
                "stateMutability": "nonpayable",
                "type": "constructor"
            }]"#,
        )
        .unwrap();
        artifact
    }

    #[test]
    fn no_constructor_means_plain_bytecode() {
        let artifact = simple_storage();
        let code = deployment_code(&artifact, &[]).unwrap();
        assert_eq!(code, artifact.bytecode);
    }

    #[test]
    fn arguments_without_constructor_fail() {
        let err = deployment_code(&simple_storage(), &["1".into()]).unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::InvalidConstructor(ArgumentError::Arity {
                expected: 0,
                found: 1
            })
        ));
    }

    #[test]
    fn appends_constructor_arguments() {
        let artifact = with_constructor(simple_storage());
        let args = vec![
            "15".to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
        ];
        let code = deployment_code(&artifact, &args).unwrap();

        let (bytecode, encoded) = code.split_at(artifact.bytecode.len());
        assert_eq!(bytecode, &artifact.bytecode[..]);
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[31], 15);
        assert_eq!(
            hex::encode(&encoded[44..64]),
            "f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn constructor_arity_is_checked() {
        let artifact = with_constructor(simple_storage());
        let err = deployment_code(&artifact, &["15".into()]).unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::InvalidConstructor(ArgumentError::Arity {
                expected: 2,
                found: 1
            })
        ));
    }
}
