// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Calls against a deployed contract.

use alloy::{
    dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt, Specifier},
    json_abi::{Function, JsonAbi, Param, StateMutability},
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::{RpcError, TransportErrorKind},
};

use super::{
    network::{CallAccess, NetworkClient, NetworkError},
    transaction::{self, Payload, TransactionError, TxConfig},
};
use crate::utils::color::{Color, DebugColor};

/// Address and interface of a deployed contract.
///
/// Only produced by a confirmed deployment, or explicitly from an address the caller vouches for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractHandle {
    pub address: Address,
    pub abi: JsonAbi,
}

#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    #[error("expected {expected} arguments, got {found}")]
    Arity { expected: usize, found: usize },
    #[error("could not parse argument {param}: {error}")]
    Invalid {
        param: String,
        error: alloy::dyn_abi::Error,
    },
    #[error("failed to encode arguments: {0}")]
    Encode(#[from] alloy::dyn_abi::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("function {} not found in ABI", .0.red())]
    UnknownFunction(String),
    #[error("function {name} has several overloads taking {arity} arguments")]
    AmbiguousFunction { name: String, arity: usize },
    #[error("invalid arguments for {function}: {error}")]
    InvalidArgument {
        function: String,
        error: ArgumentError,
    },
    #[error("failed to decode output of {function}: {error}")]
    Decode {
        function: String,
        error: alloy::dyn_abi::Error,
    },

    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    Transaction(#[from] TransactionError),
}

impl From<RpcError<TransportErrorKind>> for ContractError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        Self::Network(err.into())
    }
}

/// Coerces user-supplied strings into ABI values for the given parameters.
pub fn coerce_args(params: &[Param], args: &[String]) -> Result<Vec<DynSolValue>, ArgumentError> {
    if params.len() != args.len() {
        return Err(ArgumentError::Arity {
            expected: params.len(),
            found: args.len(),
        });
    }
    params
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            param
                .resolve()
                .and_then(|ty| ty.coerce_str(arg))
                .map_err(|error| ArgumentError::Invalid {
                    param: param.to_string(),
                    error,
                })
        })
        .collect()
}

impl ContractHandle {
    pub fn new(address: Address, abi: JsonAbi) -> Self {
        Self { address, abi }
    }

    /// Looks up a function by name, using the argument count to pick between overloads.
    pub fn function(&self, name: &str, arity: usize) -> Result<&Function, ContractError> {
        let overloads = self
            .abi
            .function(name)
            .ok_or_else(|| ContractError::UnknownFunction(name.to_string()))?;
        let mut matching = overloads.iter().filter(|f| f.inputs.len() == arity);
        match (matching.next(), matching.next()) {
            (Some(function), None) => Ok(function),
            (Some(_), Some(_)) => Err(ContractError::AmbiguousFunction {
                name: name.to_string(),
                arity,
            }),
            (None, _) => Err(ContractError::InvalidArgument {
                function: name.to_string(),
                error: ArgumentError::Arity {
                    expected: overloads[0].inputs.len(),
                    found: arity,
                },
            }),
        }
    }

    /// Returns the function and its calldata for a call with string arguments.
    pub fn encode_call(
        &self,
        name: &str,
        args: &[String],
    ) -> Result<(&Function, Bytes), ContractError> {
        let function = self.function(name, args.len())?;
        let invalid = |error: ArgumentError| ContractError::InvalidArgument {
            function: function.signature(),
            error,
        };
        let values = coerce_args(&function.inputs, args).map_err(invalid)?;
        let input = function
            .abi_encode_input(&values)
            .map_err(|err| invalid(err.into()))?;
        Ok((function, input.into()))
    }
}

/// Calls a function through `eth_call` against the latest state.
///
/// Nothing is signed and no nonce is consumed.
pub async fn call_read<C: CallAccess>(
    handle: &ContractHandle,
    function: &str,
    args: &[String],
    client: &C,
) -> Result<Vec<DynSolValue>, ContractError> {
    let (function, input) = handle.encode_call(function, args)?;
    debug!(@grey, "calling {} on {}", function.signature().lavender(), handle.address.debug_lavender());
    let mut tx = TransactionRequest::default()
        .with_to(handle.address)
        .with_input(input);
    if let Some(caller) = client.caller() {
        tx.set_from(caller);
    }
    let output = client.provider().call(tx).await?;
    function
        .abi_decode_output(&output)
        .map_err(|error| ContractError::Decode {
            function: function.signature(),
            error,
        })
}

/// Sends a state-changing call and waits for it to be mined.
pub async fn call_write<P: Provider>(
    handle: &ContractHandle,
    function: &str,
    args: &[String],
    client: &mut NetworkClient<P>,
    config: &TxConfig,
) -> Result<TransactionReceipt, ContractError> {
    let (function, input) = handle.encode_call(function, args)?;
    if matches!(
        function.state_mutability,
        StateMutability::Pure | StateMutability::View
    ) {
        warn!(@yellow, "{} does not modify state", function.signature());
    }
    debug!(@grey, "sending {} to {}", function.signature().lavender(), handle.address.debug_lavender());
    let payload = Payload::Call {
        to: handle.address,
        input,
    };
    Ok(transaction::send(payload, client, config).await?)
}
