// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compilation artifacts and the standard-JSON compiler output they are extracted from.

use std::{collections::BTreeMap, fs, path::Path};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;

use crate::utils::decode0x;

/// ABI and bytecode of a single compiled contract.
///
/// Artifacts are produced once per compilation and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationArtifact {
    pub source_name: String,
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
    pub metadata: Option<String>,
    pub source_map: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("contract {contract} not found in {source_name} (available: {available})")]
    MissingContract {
        source_name: String,
        contract: String,
        available: String,
    },
    #[error("contract {0} has no bytecode, is it abstract or an interface?")]
    EmptyBytecode(String),
    #[error("invalid bytecode for {contract}: {error}")]
    InvalidBytecode {
        contract: String,
        error: hex::FromHexError,
    },
}

/// Output of `solc --standard-json`, reduced to the fields this crate consumes.
#[derive(Debug, Default, Deserialize)]
pub struct CompilerOutput {
    #[serde(default)]
    pub errors: Vec<Diagnostic>,
    #[serde(default)]
    pub contracts: BTreeMap<String, BTreeMap<String, ContractOutput>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Diagnostic {
    pub severity: String,
    pub message: String,
    #[serde(rename = "formattedMessage")]
    pub formatted_message: Option<String>,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }

    /// The compiler's preformatted message (with source excerpt) when present.
    pub fn display(&self) -> &str {
        self.formatted_message.as_deref().unwrap_or(&self.message)
    }
}

#[derive(Debug, Deserialize)]
pub struct ContractOutput {
    #[serde(default)]
    pub abi: JsonAbi,
    pub metadata: Option<String>,
    pub evm: EvmOutput,
}

#[derive(Debug, Deserialize)]
pub struct EvmOutput {
    pub bytecode: BytecodeOutput,
}

#[derive(Debug, Deserialize)]
pub struct BytecodeOutput {
    pub object: String,
    #[serde(rename = "sourceMap")]
    pub source_map: Option<String>,
}

impl CompilerOutput {
    pub fn parse(json: &str) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Diagnostics with `error` severity.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().filter(|diagnostic| diagnostic.is_error())
    }

    /// Diagnostics that do not fail the compilation.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().filter(|diagnostic| !diagnostic.is_error())
    }

    /// Extracts the artifact for `contract_name` declared in `source_name`.
    pub fn artifact(
        &self,
        source_name: &str,
        contract_name: &str,
    ) -> Result<CompilationArtifact, ArtifactError> {
        let contract = self
            .contracts
            .get(source_name)
            .and_then(|contracts| contracts.get(contract_name))
            .ok_or_else(|| ArtifactError::MissingContract {
                source_name: source_name.to_string(),
                contract: contract_name.to_string(),
                available: self.contract_names().join(", "),
            })?;

        let bytecode =
            decode0x(&contract.evm.bytecode.object).map_err(|error| {
                ArtifactError::InvalidBytecode {
                    contract: contract_name.to_string(),
                    error,
                }
            })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(contract_name.to_string()));
        }

        Ok(CompilationArtifact {
            source_name: source_name.to_string(),
            contract_name: contract_name.to_string(),
            abi: contract.abi.clone(),
            bytecode: bytecode.into(),
            metadata: contract.metadata.clone(),
            source_map: contract.evm.bytecode.source_map.clone(),
        })
    }

    fn contract_names(&self) -> Vec<String> {
        self.contracts
            .iter()
            .flat_map(|(source, contracts)| {
                contracts.keys().map(move |name| format!("{source}:{name}"))
            })
            .collect()
    }
}

/// Persists the raw compiler output so it can be inspected or reloaded later.
pub fn write_artifact(output: &str, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, output)?;
    debug!(@grey, "wrote compiler output to {}", path.display());
    Ok(())
}

/// Loads an artifact from a compiler output previously written by [`write_artifact`].
pub fn read_artifact(
    path: impl AsRef<Path>,
    source_name: &str,
    contract_name: &str,
) -> Result<CompilationArtifact, ArtifactError> {
    let json = fs::read_to_string(path)?;
    CompilerOutput::parse(&json)?.artifact(source_name, contract_name)
}
