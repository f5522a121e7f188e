// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

macro_rules! debug {
    (@$color:ident, $($msg:expr),*) => {{
        use crate::utils::color::Color;
        let msg = format!($($msg),*);
        log::debug!("{}", msg.$color())
    }};
}

macro_rules! info {
    (@$color:ident, $($msg:expr),*) => {{
        use crate::utils::color::Color;
        let msg = format!($($msg),*);
        log::info!("{}", msg.$color())
    }};
}

macro_rules! warn {
    (@$color:ident, $($msg:expr),*) => {{
        use crate::utils::color::Color;
        let msg = format!($($msg),*);
        log::warn!("{}", msg.$color())
    }};
}

macro_rules! greyln {
    ($($msg:expr),*) => {{
        use crate::utils::color::Color;
        let msg = format!($($msg),*);
        println!("{}", msg.grey())
    }};
}

macro_rules! mintln {
    ($($msg:expr),*) => {{
        use crate::utils::color::Color;
        let msg = format!($($msg),*);
        println!("{}", msg.mint())
    }};
}
