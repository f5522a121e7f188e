// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Well-known networks the runner can target without extra configuration.

/// Chain id used by Ganache's desktop app.
pub const GANACHE_CHAIN_ID: u64 = 1337;
/// Chain id used by Anvil and Hardhat dev nodes.
pub const ANVIL_CHAIN_ID: u64 = 31337;
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum NetworkPreset {
    /// Local Ganache instance
    Ganache,
    /// Local Anvil dev node
    Anvil,
    /// Sepolia public testnet (requires an endpoint)
    Sepolia,
}

impl NetworkPreset {
    /// Default RPC endpoint, only known for local development chains.
    pub fn endpoint(self) -> Option<&'static str> {
        match self {
            Self::Ganache => Some("http://127.0.0.1:7545"),
            Self::Anvil => Some("http://127.0.0.1:8545"),
            Self::Sepolia => None,
        }
    }

    pub fn chain_id(self) -> u64 {
        match self {
            Self::Ganache => GANACHE_CHAIN_ID,
            Self::Anvil => ANVIL_CHAIN_ID,
            Self::Sepolia => SEPOLIA_CHAIN_ID,
        }
    }

    pub fn is_local(self) -> bool {
        self.endpoint().is_some()
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            GANACHE_CHAIN_ID => Some(Self::Ganache),
            ANVIL_CHAIN_ID => Some(Self::Anvil),
            SEPOLIA_CHAIN_ID => Some(Self::Sepolia),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_round_trip_chain_ids() {
        for preset in [NetworkPreset::Ganache, NetworkPreset::Anvil, NetworkPreset::Sepolia] {
            assert_eq!(NetworkPreset::from_chain_id(preset.chain_id()), Some(preset));
        }
        assert_eq!(NetworkPreset::from_chain_id(1), None);
    }

    #[test]
    fn only_dev_chains_are_local() {
        assert!(NetworkPreset::Ganache.is_local());
        assert!(NetworkPreset::Anvil.is_local());
        assert!(!NetworkPreset::Sepolia.is_local());
    }
}
