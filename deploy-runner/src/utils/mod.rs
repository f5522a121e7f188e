// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt::Display;

use eyre::bail;

use style::{BOLD, ERROR, NOTE};

mod style;

pub fn convert_gwei_to_wei(fee_str: &str) -> eyre::Result<u128> {
    let gwei = match fee_str.parse::<f64>() {
        Ok(fee) if fee >= 0.0 => fee,
        Ok(_) => bail!("gas price must be non-negative"),
        Err(_) => bail!("invalid gas price value: {}", fee_str),
    };

    if !gwei.is_finite() {
        bail!("invalid gwei value: must be finite");
    }

    let wei = gwei * 1e9;
    if !wei.is_finite() || wei >= u128::MAX as f64 {
        bail!("gas price outside valid range for wei");
    }

    Ok(wei as u128)
}

pub fn print_error(err: impl Display) {
    eprintln!("{ERROR}error{ERROR:#}{BOLD}:{BOLD:#} {err}");
}

/// Prints a secondary line under an error, such as the failing stage.
pub fn print_note(note: impl Display) {
    eprintln!("{NOTE}note{NOTE:#}{BOLD}:{BOLD:#} {note}");
}
