// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Thin wrapper over the `solc` executable.

use std::{
    ffi::OsStr,
    io::Write,
    process::{Command, Stdio},
};

use regex::Regex;

use super::{color::Color, sys};

const LINK: &str = "https://docs.soliditylang.org/en/latest/installing-solidity.html";

pub fn check_exists(solc: impl AsRef<OsStr>) -> Result<(), SolcError> {
    if sys::command_exists(solc) {
        Ok(())
    } else {
        Err(SolcError::CommandDoesNotExist)
    }
}

/// Returns the `major.minor.patch` version reported by `solc --version`.
pub fn version(solc: impl AsRef<OsStr>) -> Result<String, SolcError> {
    let output = Command::new(solc).arg("--version").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        return Err(SolcError::Failed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    parse_version(&stdout).ok_or_else(|| SolcError::UnknownVersion(stdout.trim().to_string()))
}

fn parse_version(text: &str) -> Option<String> {
    let re = Regex::new(r"Version: (\d+\.\d+\.\d+)").ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|version| version.as_str().to_string())
}

/// Runs `solc --standard-json`, feeding `input` on stdin and returning stdout.
///
/// solc reports compilation errors inside the JSON output and still exits successfully, so a
/// non-zero exit code here means the compiler itself could not run.
pub fn standard_json(solc: impl AsRef<OsStr>, input: &str) -> Result<String, SolcError> {
    let mut child = Command::new(solc)
        .arg("--standard-json")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }
    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(SolcError::Failed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(String::from_utf8(output.stdout)?)
}

#[derive(Debug, thiserror::Error)]
pub enum SolcError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("from utf8 error: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),

    #[error("solc not found. Please see\n{link}", link = LINK.red())]
    CommandDoesNotExist,
    #[error("solc failed (exit code: {exit_code:?}): {stderr}")]
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
    #[error("could not read solc version from: {0}")]
    UnknownVersion(String),
}
