// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{io::Write, path::Path};

use crate::{
    core::{
        artifact::{ArtifactError, CompilationArtifact},
        compile::{self, CompileConfig, ContractSource},
    },
    utils::{color::DebugColor, sys},
    Result,
};

/// Compiles a source file and prints a summary of the extracted contract.
pub fn compile(source: impl AsRef<Path>, config: &CompileConfig) -> Result<CompilationArtifact> {
    let source = ContractSource::read(source)?;
    let artifact = compile::compile(&source, config)?;

    greyln!(
        "compiled {}: {} bytes of bytecode",
        artifact.contract_name.debug_lavender(),
        artifact.bytecode.len()
    );
    for function in artifact.abi.functions() {
        greyln!("  {}", function.signature());
    }
    if let Some(path) = &config.artifact_path {
        greyln!("compiler output written to {}", path.display());
    }
    Ok(artifact)
}

/// Writes the artifact's ABI as JSON to a file, or to stdout.
pub fn export_abi(
    artifact: &CompilationArtifact,
    output: Option<&Path>,
) -> Result<(), ArtifactError> {
    let mut out = sys::file_or_stdout(output)?;
    serde_json::to_writer_pretty(&mut out, &artifact.abi)?;
    writeln!(out)?;
    Ok(())
}
