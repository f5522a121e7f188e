// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use deploy_tools::core::chain::NetworkPreset;

/// Network targeted when neither a preset nor an endpoint is given.
pub const DEFAULT_NETWORK: NetworkPreset = NetworkPreset::Ganache;

pub const DEFAULT_SOURCE_NAME: &str = "SimpleStorage.sol";
pub const DEFAULT_CONTRACT_NAME: &str = "SimpleStorage";
