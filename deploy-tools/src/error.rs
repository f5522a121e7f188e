// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;

use crate::{
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
    utils::solc::SolcError,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Stage a failure happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The source did not compile, or the compiler could not be run
    Compile,
    /// Missing or invalid settings, endpoint or user input
    Config,
    /// Connectivity, rejected or reverted transactions, unexpected node responses
    Network,
    /// Unusable key material or a failed signature
    Signing,
    /// A receipt did not arrive in time
    Timeout,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Compile => "compile",
            Self::Config => "config",
            Self::Network => "network",
            Self::Signing => "signing",
            Self::Timeout => "timeout",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Compile(#[from] CompileError),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Signing(#[from] SigningError),
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    Transaction(#[from] TransactionError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error("{0}")]
    Contract(#[from] ContractError),
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Config(err) => Self::Config(err),
            ResolveError::Signing(err) => Self::Signing(err),
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Compile(err) => err.kind(),
            Self::Artifact(err) => err.kind(),
            Self::Config(err) => err.kind(),
            Self::Signing(err) => err.kind(),
            Self::Network(err) => err.kind(),
            Self::Transaction(err) => err.kind(),
            Self::Deployment(err) => err.kind(),
            Self::Contract(err) => err.kind(),
        }
    }
}

impl SolcError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Compile
    }
}

impl ArtifactError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Compile
    }
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Compile
    }
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Config
    }
}

impl SigningError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Signing
    }
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(err) => err.kind(),
            Self::Signing(err) => err.kind(),
        }
    }
}

impl NetworkError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Network
    }
}

impl TransactionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(err) => err.kind(),
            Self::Signing(err) => err.kind(),
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Reverted { .. } | Self::InvalidTransition { .. } => ErrorKind::Network,
        }
    }
}

impl DeploymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transaction(err) => err.kind(),
            Self::InvalidConstructor(_) => ErrorKind::Config,
            Self::MissingContractAddress { .. } => ErrorKind::Network,
        }
    }
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownFunction(_)
            | Self::AmbiguousFunction { .. }
            | Self::InvalidArgument { .. } => ErrorKind::Config,
            Self::Decode { .. } => ErrorKind::Network,
            Self::Network(err) => err.kind(),
            Self::Transaction(err) => err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy::primitives::TxHash;

    use super::*;
    use crate::core::contract::ArgumentError;

    #[test]
    fn transaction_errors_map_to_their_stage() {
        let timeout = TransactionError::Timeout {
            tx_hash: TxHash::ZERO,
            timeout: Duration::from_secs(1),
        };
        assert_eq!(timeout.kind(), ErrorKind::Timeout);

        let reverted = TransactionError::Reverted {
            tx_hash: TxHash::ZERO,
        };
        assert_eq!(reverted.kind(), ErrorKind::Network);

        let signing = TransactionError::Signing(SigningError::EmptyKey);
        assert_eq!(signing.kind(), ErrorKind::Signing);
    }

    #[test]
    fn nested_errors_keep_their_stage() {
        let err: Error = DeploymentError::Transaction(TransactionError::Timeout {
            tx_hash: TxHash::ZERO,
            timeout: Duration::from_secs(1),
        })
        .into();
        assert_eq!(err.kind(), ErrorKind::Timeout);

        let err: Error = ResolveError::Signing(SigningError::EmptyKey).into();
        assert_eq!(err.kind(), ErrorKind::Signing);

        let err: Error = ContractError::InvalidArgument {
            function: "store(uint256)".into(),
            error: ArgumentError::Arity {
                expected: 1,
                found: 0,
            },
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err: Error = CompileError::Diagnostics(vec![]).into();
        assert_eq!(err.kind(), ErrorKind::Compile);
    }
}
