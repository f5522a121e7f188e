// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Terminal colors for progress output.

use std::fmt::{Debug, Display};

pub const GREY: &str = "\x1b[0;0m";
pub const LAVENDER: &str = "\x1b[38;5;183;1m";
pub const MINT: &str = "\x1b[38;5;48;1m";
pub const RED: &str = "\x1b[31;1m";
pub const RESET: &str = "\x1b[0;0m";
pub const YELLOW: &str = "\x1b[33;1m";

fn paint(color: &str, text: impl Display) -> String {
    format!("{color}{text}{RESET}")
}

pub trait Color {
    fn color(&self, color: &str) -> String;

    fn grey(&self) -> String {
        self.color(GREY)
    }
    fn lavender(&self) -> String {
        self.color(LAVENDER)
    }
    fn mint(&self) -> String {
        self.color(MINT)
    }
    fn red(&self) -> String {
        self.color(RED)
    }
    fn yellow(&self) -> String {
        self.color(YELLOW)
    }
}

impl<T: Display + ?Sized> Color for T {
    fn color(&self, color: &str) -> String {
        paint(color, self)
    }
}

/// Like [`Color`], but for values that are best shown with their [`Debug`] representation, such
/// as addresses and hashes.
pub trait DebugColor {
    fn debug_color(&self, color: &str) -> String;

    fn debug_lavender(&self) -> String {
        self.debug_color(LAVENDER)
    }
    fn debug_red(&self) -> String {
        self.debug_color(RED)
    }
}

impl<T: Debug + ?Sized> DebugColor for T {
    fn debug_color(&self, color: &str) -> String {
        paint(color, format!("{self:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_text_in_escape_codes() {
        assert_eq!("ok".mint(), format!("{MINT}ok{RESET}"));
        assert_eq!(7u64.debug_lavender(), format!("{LAVENDER}7{RESET}"));
    }
}
