// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Loading the sender's key material.

use std::{fs, path::PathBuf};

use alloy::{
    primitives::B256,
    signers::{
        local::{LocalSigner, LocalSignerError, PrivateKeySigner},
        Signer,
    },
};

use crate::utils::decode0x;

/// Where the sender's private key comes from.
#[derive(Clone)]
pub enum KeySource {
    /// Hex-encoded private key, with or without `0x`
    PrivateKey(String),
    /// Text file containing a hex-encoded private key
    PrivateKeyFile(PathBuf),
    /// Encrypted JSON keystore
    Keystore {
        path: PathBuf,
        password_path: Option<PathBuf>,
    },
}

// Keys must never end up in logs.
impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrivateKey(_) => f.write_str("PrivateKey(<redacted>)"),
            Self::PrivateKeyFile(path) => f.debug_tuple("PrivateKeyFile").field(path).finish(),
            Self::Keystore {
                path,
                password_path,
            } => f
                .debug_struct("Keystore")
                .field("path", path)
                .field("password_path", password_path)
                .finish(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("empty private key")]
    EmptyKey,
    #[error("malformed private key: {0}")]
    MalformedKey(String),
    #[error("could not read {}: {error}", .path.display())]
    ReadKeyFile {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("keystore error: {0}")]
    Keystore(#[from] LocalSignerError),
    #[error("failed to sign transaction: {0}")]
    Sign(String),
}

/// Builds a signer bound to `chain_id` from the given key source.
pub fn load_signer(source: &KeySource, chain_id: u64) -> Result<PrivateKeySigner, SigningError> {
    let signer = match source {
        KeySource::PrivateKey(key) => parse_private_key(key)?,
        KeySource::PrivateKeyFile(path) => {
            let key = fs::read_to_string(path).map_err(|error| SigningError::ReadKeyFile {
                path: path.clone(),
                error,
            })?;
            parse_private_key(&key)?
        }
        KeySource::Keystore {
            path,
            password_path,
        } => {
            let password = match password_path {
                Some(password_path) => fs::read_to_string(password_path)
                    .map_err(|error| SigningError::ReadKeyFile {
                        path: password_path.clone(),
                        error,
                    })?
                    .trim_end()
                    .to_string(),
                None => String::new(),
            };
            LocalSigner::decrypt_keystore(path, password)?
        }
    };
    Ok(signer.with_chain_id(Some(chain_id)))
}

fn parse_private_key(key: &str) -> Result<PrivateKeySigner, SigningError> {
    if key.trim().is_empty() {
        return Err(SigningError::EmptyKey);
    }
    let bytes = decode0x(key).map_err(|err| SigningError::MalformedKey(err.to_string()))?;
    let bytes = B256::try_from(bytes.as_slice())
        .map_err(|_| SigningError::MalformedKey(format!("expected 32 bytes, got {}", bytes.len())))?;
    PrivateKeySigner::from_bytes(&bytes).map_err(|err| SigningError::MalformedKey(err.to_string()))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    // Anvil's first dev account.
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn loads_hex_key() {
        let signer = load_signer(&KeySource::PrivateKey(DEV_KEY.into()), 31337).unwrap();
        assert_eq!(
            signer.address(),
            address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")
        );
        assert_eq!(signer.chain_id(), Some(31337));
    }

    #[test]
    fn loads_key_file_with_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        fs::write(&path, format!("{}\n", DEV_KEY.trim_start_matches("0x"))).unwrap();
        let signer = load_signer(&KeySource::PrivateKeyFile(path), 1337).unwrap();
        assert_eq!(
            signer.address(),
            address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")
        );
    }

    #[test]
    fn rejects_bad_keys() {
        let empty = load_signer(&KeySource::PrivateKey("".into()), 1);
        assert!(matches!(empty, Err(SigningError::EmptyKey)));
        let short = load_signer(&KeySource::PrivateKey("0x1234".into()), 1);
        assert!(matches!(short, Err(SigningError::MalformedKey(_))));
        let not_hex = load_signer(&KeySource::PrivateKey("not a key".into()), 1);
        assert!(matches!(not_hex, Err(SigningError::MalformedKey(_))));
        let zero = load_signer(&KeySource::PrivateKey(format!("0x{}", "00".repeat(32))), 1);
        assert!(matches!(zero, Err(SigningError::MalformedKey(_))));
    }

    #[test]
    fn debug_redacts_key() {
        let source = KeySource::PrivateKey(DEV_KEY.into());
        assert!(!format!("{source:?}").contains("ac0974"));
    }
}
