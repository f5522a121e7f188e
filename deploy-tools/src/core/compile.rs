// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compile Solidity sources with `solc`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::json;

use crate::{
    core::artifact::{write_artifact, ArtifactError, CompilationArtifact, CompilerOutput},
    utils::{
        color::{Color, DebugColor},
        solc::{self, SolcError},
    },
};

/// Compiler version the bundled contracts are written against.
pub const DEFAULT_SOLC_VERSION: &str = "0.8.0";

/// Where the raw compiler output is written unless configured otherwise.
pub const DEFAULT_ARTIFACT_PATH: &str = "compiled_code.json";

const OUTPUT_SELECTION: &[&str] = &["abi", "metadata", "evm.bytecode", "evm.sourceMap"];

/// A Solidity source file, identified by its logical name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractSource {
    name: String,
    content: String,
}

impl ContractSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Reads a source file, naming it after the file name (e.g. `SimpleStorage.sol`).
    pub fn read(path: impl AsRef<Path>) -> Result<Self, CompileError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|error| CompileError::ReadSource {
            path: path.to_path_buf(),
            error,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| CompileError::InvalidSourcePath(path.to_path_buf()))?;
        Ok(Self::new(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Default contract name: the source name without its extension.
    pub fn default_contract_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug)]
pub struct CompileConfig {
    /// Path or name of the `solc` executable.
    pub solc: PathBuf,
    /// Version `solc` must report; not checked when `None`.
    pub solc_version: Option<String>,
    /// Contract to extract; defaults to the source's file stem.
    pub contract_name: Option<String>,
    /// Where to persist the raw compiler output; nothing is written when `None`.
    pub artifact_path: Option<PathBuf>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            solc: PathBuf::from("solc"),
            solc_version: Some(DEFAULT_SOLC_VERSION.to_string()),
            contract_name: None,
            artifact_path: Some(PathBuf::from(DEFAULT_ARTIFACT_PATH)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to read source {}: {error}", .path.display())]
    ReadSource {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("invalid source path: {}", .0.display())]
    InvalidSourcePath(PathBuf),

    #[error("{0}")]
    Solc(#[from] SolcError),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    #[error("solc version mismatch: want {}, found {}", .expected.mint(), .found.red())]
    VersionMismatch { expected: String, found: String },
    #[error("compilation failed:\n{}", .0.join("\n"))]
    Diagnostics(Vec<String>),
}

/// Builds the standard-JSON input for a single source.
pub fn standard_json_input(source: &ContractSource) -> serde_json::Value {
    json!({
        "language": "Solidity",
        "sources": {
            source.name(): { "content": source.content() }
        },
        "settings": {
            "outputSelection": {
                "*": { "*": OUTPUT_SELECTION }
            }
        }
    })
}

/// Compiles a source and extracts the configured contract's artifact.
///
/// The raw compiler output is written to [`CompileConfig::artifact_path`] when set.
pub fn compile(
    source: &ContractSource,
    config: &CompileConfig,
) -> Result<CompilationArtifact, CompileError> {
    solc::check_exists(&config.solc)?;
    if let Some(expected) = &config.solc_version {
        let found = solc::version(&config.solc)?;
        if &found != expected {
            return Err(CompileError::VersionMismatch {
                expected: expected.clone(),
                found,
            });
        }
        debug!(@grey, "using solc {}", found.debug_lavender());
    }

    info!(@grey, "compiling {}", source.name().lavender());
    let input = standard_json_input(source).to_string();
    let raw = solc::standard_json(&config.solc, &input)?;
    let contract_name = config
        .contract_name
        .as_deref()
        .unwrap_or_else(|| source.default_contract_name());
    let artifact = extract(&raw, source.name(), contract_name)?;

    if let Some(path) = &config.artifact_path {
        write_artifact(&raw, path)?;
    }
    Ok(artifact)
}

/// Checks compiler diagnostics and pulls the named contract out of raw compiler output.
pub fn extract(
    raw: &str,
    source_name: &str,
    contract_name: &str,
) -> Result<CompilationArtifact, CompileError> {
    let output = CompilerOutput::parse(raw)?;
    for warning in output.warnings() {
        warn!(@yellow, "{}", warning.display().trim_end());
    }
    let errors: Vec<String> = output
        .errors()
        .map(|diagnostic| diagnostic.display().trim_end().to_string())
        .collect();
    if !errors.is_empty() {
        return Err(CompileError::Diagnostics(errors));
    }
    Ok(output.artifact(source_name, contract_name)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::artifact::tests::SIMPLE_STORAGE_OUTPUT, utils::sys};

    const SOURCE: &str = include_str!("../../../contracts/SimpleStorage.sol");

    #[test]
    fn builds_standard_json_input() {
        let source = ContractSource::new("SimpleStorage.sol", "contract A {}");
        let input = standard_json_input(&source);
        assert_eq!(input["language"], "Solidity");
        assert_eq!(
            input["sources"]["SimpleStorage.sol"]["content"],
            "contract A {}"
        );
        assert_eq!(
            input["settings"]["outputSelection"]["*"]["*"],
            json!(["abi", "metadata", "evm.bytecode", "evm.sourceMap"])
        );
    }

    #[test]
    fn names_source_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SimpleStorage.sol");
        fs::write(&path, SOURCE).unwrap();
        let source = ContractSource::read(&path).unwrap();
        assert_eq!(source.name(), "SimpleStorage.sol");
        assert_eq!(source.default_contract_name(), "SimpleStorage");
    }

    #[test]
    fn missing_source_fails() {
        let err = ContractSource::read("does/not/exist.sol").unwrap_err();
        assert!(matches!(err, CompileError::ReadSource { .. }));
    }

    #[test]
    fn error_diagnostics_fail_compilation() {
        let raw = r#"{
            "errors": [{
                "severity": "error",
                "message": "Expected ';' but got '}'",
                "formattedMessage": "ParserError: Expected ';' but got '}'\n"
            }]
        }"#;
        match extract(raw, "Broken.sol", "Broken") {
            Err(CompileError::Diagnostics(errors)) => {
                assert_eq!(errors, vec!["ParserError: Expected ';' but got '}'"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn warnings_do_not_fail_compilation() {
        let artifact = extract(SIMPLE_STORAGE_OUTPUT, "SimpleStorage.sol", "SimpleStorage").unwrap();
        assert!(!artifact.bytecode.is_empty());
    }

    #[test]
    fn compiling_twice_is_deterministic() {
        if !sys::command_exists("solc") {
            eprintln!("solc not installed, skipping");
            return;
        }
        let source = ContractSource::new("SimpleStorage.sol", SOURCE);
        let config = CompileConfig {
            solc_version: None,
            artifact_path: None,
            ..Default::default()
        };
        let first = compile(&source, &config).unwrap();
        let second = compile(&source, &config).unwrap();
        assert_eq!(first.bytecode, second.bytecode);
        assert_eq!(first.abi, second.abi);
    }
}
