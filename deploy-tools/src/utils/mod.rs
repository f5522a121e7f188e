// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.
//!
//! None of these are specific to a single contract; [`deploy-tools`](crate) uses them to drive
//! the compiler and to print progress.

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{utils::format_units, U256},
};

pub mod color;
pub mod solc;
pub mod sys;

/// Pretty-prints a gas price given in wei.
pub fn format_gas_price(wei: u128) -> String {
    match format_units(U256::from(wei), "gwei") {
        Ok(gwei) => format!("{gwei} gwei"),
        Err(_) => format!("{wei} wei"),
    }
}

/// Renders an ABI value the way a user would type it back in on the command line.
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(word, size) => format!("0x{}", hex::encode(&word[..*size])),
        DynSolValue::Address(address) => address.to_checksum(None),
        DynSolValue::Function(function) => format!("0x{}", hex::encode(function.as_slice())),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            format!("[{}]", format_values(values))
        }
        DynSolValue::Tuple(values) => format!("({})", format_values(values)),
        #[allow(unreachable_patterns)]
        other => format!("{other:?}"),
    }
}

/// Renders a list of ABI values, comma separated.
pub fn format_values(values: &[DynSolValue]) -> String {
    values
        .iter()
        .map(format_value)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a hex string with an optional `0x` prefix.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}
