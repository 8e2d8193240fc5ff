// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! ABI dispatch table mapping function names to their encoders and decoders.

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::Bytes;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::AbiError;

/// Lookup table built once from an ABI document.
///
/// Functions are reachable by full signature (`allPairs(uint256)`) or by
/// plain name (`allPairs`) when that name is not overloaded.
#[derive(Debug, Clone, Default)]
pub struct AbiRegistry {
    by_name: HashMap<String, Vec<Function>>,
    by_signature: HashMap<String, Function>,
}

impl AbiRegistry {
    /// Build the table from a parsed ABI.
    pub fn new(abi: &JsonAbi) -> Self {
        let mut by_name: HashMap<String, Vec<Function>> = HashMap::new();
        let mut by_signature = HashMap::new();

        for function in abi.functions() {
            by_signature.insert(function.signature(), function.clone());
            by_name
                .entry(function.name.clone())
                .or_default()
                .push(function.clone());
        }

        Self {
            by_name,
            by_signature,
        }
    }

    /// Parse either a bare ABI array or a build artifact with an `abi` field.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let mut document: serde_json::Value = serde_json::from_str(json)?;
        let abi_value = match document.get_mut("abi") {
            Some(abi) => abi.take(),
            None => document,
        };
        let abi: JsonAbi = serde_json::from_value(abi_value)?;
        Ok(Self::new(&abi))
    }

    /// Load a Truffle/Hardhat build artifact (or plain ABI file) from disk.
    pub fn from_artifact_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Error reading {}: {}", path.display(), e))?;
        Self::from_json(&contents)
            .map_err(|e| anyhow::anyhow!("Error parsing ABI in {}: {}", path.display(), e))
    }

    /// Resolve a function by full signature or unambiguous name.
    pub fn function(&self, name: &str) -> Result<&Function, AbiError> {
        if let Some(function) = self.by_signature.get(name) {
            return Ok(function);
        }

        match self.by_name.get(name).map(Vec::as_slice) {
            Some([function]) => Ok(function),
            Some(overloads) if !overloads.is_empty() => Err(AbiError::Ambiguous {
                name: name.to_string(),
                candidates: overloads.iter().map(Function::signature).collect(),
            }),
            _ => Err(AbiError::UnknownFunction(name.to_string())),
        }
    }

    /// Number of distinct function signatures in the table.
    pub fn len(&self) -> usize {
        self.by_signature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_signature.is_empty()
    }

    /// Encode selector and arguments for `name`.
    pub fn encode(&self, name: &str, params: &[DynSolValue]) -> Result<Bytes, AbiError> {
        encode_call(self.function(name)?, params)
    }

    /// Decode the raw return data of `name`.
    pub fn decode(&self, name: &str, data: &[u8]) -> Result<Vec<DynSolValue>, AbiError> {
        decode_return(self.function(name)?, data)
    }
}

pub(crate) fn encode_call(function: &Function, params: &[DynSolValue]) -> Result<Bytes, AbiError> {
    Ok(function.abi_encode_input(params)?.into())
}

pub(crate) fn decode_return(function: &Function, data: &[u8]) -> Result<Vec<DynSolValue>, AbiError> {
    Ok(function.abi_decode_output(data)?)
}
