// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{dyn_abi::DynSolValue, providers::Provider, rpc::types::TransactionReceipt};

use crate::{
    core::{
        contract::{self, ContractHandle},
        network::{CallAccess, NetworkClient},
        transaction::TxConfig,
    },
    utils::{color::DebugColor, format_values},
    Result,
};

/// Calls a view function and prints what it returned.
pub async fn read<C: CallAccess>(
    handle: &ContractHandle,
    function: &str,
    args: &[String],
    client: &C,
) -> Result<Vec<DynSolValue>> {
    let values = contract::call_read(handle, function, args, client).await?;
    greyln!("{}({}) = {}", function, args.join(", "), format_values(&values));
    Ok(values)
}

/// Sends a state-changing call and waits until it is mined.
pub async fn write<P: Provider>(
    handle: &ContractHandle,
    function: &str,
    args: &[String],
    client: &mut NetworkClient<P>,
    config: &TxConfig,
) -> Result<TransactionReceipt> {
    greyln!("Updating contract...");
    let receipt = contract::call_write(handle, function, args, client, config).await?;
    mintln!("Updated!");
    greyln!(
        "tx {} used {} gas",
        receipt.transaction_hash.debug_lavender(),
        receipt.gas_used
    );
    Ok(receipt)
}
