// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for compiling Solidity contracts, deploying them and calling into them.

#[macro_use]
mod macros;

pub mod core;
pub mod ops;
pub mod utils;

mod error;

pub use error::{Error, ErrorKind, Result};
