//! Encoding of function calls against a compiled artifact's ABI
//!
//! Encoding is the standard Ethereum ABI encoding: a 4-byte selector over
//! the canonical signature, followed by the padded argument words. The
//! `ethers` ABI machinery produces this bit-exactly; nothing is
//! hand-rolled here.

use ethers::abi::{Abi, Token};

use crate::errors::ScriptError;

/// Encode a call to the named function with the given arguments
pub fn encode_call(abi: &Abi, function_name: &str, args: &[Token]) -> Result<Vec<u8>, ScriptError> {
    let function = abi
        .function(function_name)
        .map_err(|_| ScriptError::FunctionNotFound {
            function_name: function_name.to_string(),
        })?;

    if function.inputs.len() != args.len() {
        return Err(ScriptError::ArgumentMismatch {
            expected: format!("{} argument(s)", function.inputs.len()),
            got: args.len().to_string(),
        });
    }

    function
        .encode_input(args)
        .map_err(|e| ScriptError::ArgumentMismatch {
            expected: function.signature(),
            got: e.to_string(),
        })
}

/// Encode a call and render it as a `0x`-prefixed hex string, the form in
/// which calldata is persisted and passed to the proxy deployment
pub fn encode_call_hex(
    abi: &Abi,
    function_name: &str,
    args: &[Token],
) -> Result<String, ScriptError> {
    let encoded = encode_call(abi, function_name, args)?;
    Ok(format!("0x{}", hex::encode(encoded)))
}
