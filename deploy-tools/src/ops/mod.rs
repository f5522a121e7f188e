// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! User-facing operations. These wrap [`crate::core`] and print progress to stdout.

pub use call::{read, write};
pub use compile::{compile, export_abi};
pub use connect::{connect, connect_read};
pub use deploy::deploy;
pub use run::{exercise, run, RunConfig, RunReport};

pub mod run;

mod call;
mod compile;
mod connect;
mod deploy;
