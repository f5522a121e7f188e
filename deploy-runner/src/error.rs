// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

use deploy_tools::{
    core::{
        artifact::ArtifactError,
        compile::CompileError,
        config::{ConfigError, ResolveError},
        contract::ContractError,
        deployment::DeploymentError,
        network::NetworkError,
        signer::SigningError,
        transaction::TransactionError,
    },
    ErrorKind,
};

pub type RunnerResult = Result<(), RunnerError>;

/// Exit code for failures outside the staged taxonomy.
const OTHER_FAILURE: u8 = 1;

#[derive(Debug)]
pub struct RunnerError {
    error: eyre::Error,
    kind: Option<ErrorKind>,
}

impl RunnerError {
    pub fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    pub fn code(&self) -> u8 {
        self.kind.map_or(OTHER_FAILURE, exit_code)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Process exit code for a failed stage.
pub fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Config => 2,
        ErrorKind::Compile => 3,
        ErrorKind::Network => 4,
        ErrorKind::Signing => 5,
        ErrorKind::Timeout => 6,
    }
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for RunnerError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            kind: None,
        }
    }
}

impl From<eyre::Error> for RunnerError {
    fn from(error: eyre::Error) -> Self {
        Self { error, kind: None }
    }
}

macro_rules! impl_from_staged {
    ($($err:ty),* $(,)?) => {$(
        impl From<$err> for RunnerError {
            fn from(err: $err) -> Self {
                Self {
                    kind: Some(err.kind()),
                    error: err.into(),
                }
            }
        }
    )*};
}

impl_from_staged!(
    deploy_tools::Error,
    ArtifactError,
    CompileError,
    ConfigError,
    ContractError,
    DeploymentError,
    NetworkError,
    ResolveError,
    SigningError,
    TransactionError,
);
