/// Script type - a sequence of opcodes and data pushes.
///
/// The Script wraps a `Vec<u8>` and provides the assembly primitives used by
/// the templates in this crate: appending opcodes and minimal data pushes,
/// parsing into chunks, hex/ASM conversion and pay-to-script-hash wrapping.

use std::fmt;

use keyscript_primitives::hash::hash160;

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// Length of a P2SH output script: OP_HASH160 <20 bytes> OP_EQUAL.
pub const P2SH_SCRIPT_LEN: usize = 23;

/// A script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or `InvalidHex`.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Create a script from an ASM string.
    ///
    /// Known opcode names are emitted directly; any other token is treated
    /// as hex data and pushed with the minimal prefix.
    ///
    /// # Arguments
    /// * `asm` - A space-separated ASM string.
    ///
    /// # Returns
    /// A `Script`, or an error if a data token is not valid hex.
    pub fn from_asm(asm: &str) -> Result<Self, ScriptError> {
        let mut script = Script::new();
        for token in asm.split_whitespace() {
            match string_to_opcode(token) {
                Some(op) => script.append_opcodes(&[op])?,
                None => script.append_push_data_hex(token)?,
            }
        }
        Ok(script)
    }

    /// Wrap a script in a pay-to-script-hash output script.
    ///
    /// Produces `OP_HASH160 <hash160(script)> OP_EQUAL`.
    pub fn pay_to_script_hash(script: &Script) -> Script {
        Self::pay_to_script_hash_from_hash(&script.script_hash())
    }

    /// Build a P2SH output script from an already computed script hash.
    pub fn pay_to_script_hash_from_hash(hash: &[u8; 20]) -> Script {
        let mut bytes = Vec::with_capacity(P2SH_SCRIPT_LEN);
        bytes.push(OP_HASH160);
        bytes.push(OP_DATA_20);
        bytes.extend_from_slice(hash);
        bytes.push(OP_EQUAL);
        Script(bytes)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Convert the script to its ASM representation.
    ///
    /// # Returns
    /// Space-separated tokens, or an empty string if the script is empty or
    /// cannot be parsed.
    pub fn to_asm(&self) -> String {
        match self.chunks() {
            Ok(chunks) => chunks
                .iter()
                .map(ScriptChunk::to_asm_string)
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        }
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty (zero bytes).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hash160 of the script bytes, as committed to by a P2SH output.
    pub fn script_hash(&self) -> [u8; 20] {
        hash160(&self.0)
    }

    // -----------------------------------------------------------------------
    // Script classification
    // -----------------------------------------------------------------------

    /// Check if this is a Pay-to-Script-Hash (P2SH) output script.
    ///
    /// Pattern: OP_HASH160 <20 bytes> OP_EQUAL
    pub fn is_p2sh(&self) -> bool {
        let b = &self.0;
        b.len() == P2SH_SCRIPT_LEN
            && b[0] == OP_HASH160
            && b[1] == OP_DATA_20
            && b[22] == OP_EQUAL
    }

    /// Check if this script has the bare multisig shape.
    ///
    /// Pattern: OP_m <data> ... OP_n OP_CHECKMULTISIG. Only the shape is
    /// checked; use `RedeemScript::from_script` to validate the keys.
    pub fn is_multisig_out(&self) -> bool {
        let parts = match self.chunks() {
            Ok(p) => p,
            Err(_) => return false,
        };
        if parts.len() < 3 {
            return false;
        }
        let last = parts.len() - 1;
        is_small_int_op(parts[0].op())
            && parts[1..last - 1]
                .iter()
                .all(|chunk| chunk.data().is_some_and(|d| !d.is_empty()))
            && is_small_int_op(parts[last - 1].op())
            && parts[last].op() == OP_CHECKMULTISIG
    }

    /// Parse the script into a vector of decoded chunks.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Append data bytes with the minimal push prefix.
    ///
    /// # Returns
    /// `Ok(())` on success, or `DataTooBig` if the data cannot be pushed.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append hex-encoded data with the minimal push prefix.
    pub fn append_push_data_hex(&mut self, hex_str: &str) -> Result<(), ScriptError> {
        let data = hex::decode(hex_str).map_err(|_| ScriptError::InvalidOpcodeData)?;
        self.append_push_data(&data)
    }

    /// Append bare opcodes.
    ///
    /// Push data opcodes (OP_DATA_1..=OP_PUSHDATA4) are rejected since they
    /// need a payload; use `append_push_data` for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        if let Some(&op) = opcodes
            .iter()
            .find(|&&op| (OP_DATA_1..=OP_PUSHDATA4).contains(&op))
        {
            return Err(ScriptError::InvalidOpcodeType(format!(
                "{} ({:#04x})",
                opcode_to_string(op),
                op
            )));
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
