// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod artifact;
pub mod chain;
pub mod compile;
pub mod config;
pub mod contract;
pub mod deployment;
pub mod network;
pub mod nonce;
pub mod signer;
pub mod transaction;
