//! Bare multisig redeem scripts.
//!
//! A redeem script locks funds to `m` of `n` public keys:
//!
//! ```text
//! OP_m <pubkey 1> ... <pubkey n> OP_n OP_CHECKMULTISIG
//! ```
//!
//! It is normally committed to through a pay-to-script-hash output (see
//! [`RedeemScript::output_script`]).

use std::fmt;

use keyscript_primitives::ec::{Key, PublicKey};

use crate::address::{Address, Network};
use crate::chunk::ScriptChunk;
use crate::opcodes::*;
use crate::{Script, ScriptError};

/// Maximum number of public keys in a multisig script.
pub const MAX_MULTISIG_KEYS: usize = 16;

/// How strictly [`RedeemScript::from_script_with_mode`] checks its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// The script must be exactly the canonical encoding of its keys: the
    /// trailer is `OP_n OP_CHECKMULTISIG` with `n` equal to the number of
    /// key pushes, and every push is minimal.
    #[default]
    Strict,
    /// Only the leading `OP_m` and the key pushes are read. The last two
    /// items are skipped unchecked and the script is rebuilt from the keys.
    Lenient,
}

/// An `m`-of-`n` multisig redeem script.
///
/// Always holds `1 <= m <= n <= 16`, and `script` is exactly the canonical
/// instruction sequence for `m` and `keys`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedeemScript {
    script: Script,
    required_signatures: usize,
    keys: Vec<PublicKey>,
}

impl RedeemScript {
    /// Build a redeem script requiring `required_signatures` of `keys`.
    ///
    /// Keys are pushed in the order given, each in its own encoding
    /// (33-byte compressed or 65-byte uncompressed).
    ///
    /// # Arguments
    /// * `required_signatures` - The threshold `m`.
    /// * `keys` - The keys `k1..kn`; every one must be a public key.
    ///
    /// # Returns
    /// The script, or the first violated constraint in this order:
    /// `ThresholdExceedsKeyCount`, `TooManyKeys`, `InvalidKeyType`,
    /// `ZeroThreshold`.
    pub fn new<I>(required_signatures: usize, keys: I) -> Result<Self, ScriptError>
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        let m = required_signatures;
        let n = keys.len();

        if m > n {
            log::debug!("rejecting {}-of-{} multisig: threshold exceeds key count", m, n);
            return Err(ScriptError::ThresholdExceedsKeyCount { required: m, keys: n });
        }
        if n > MAX_MULTISIG_KEYS {
            log::debug!("rejecting multisig with {} keys", n);
            return Err(ScriptError::TooManyKeys(n));
        }

        let keys = keys
            .into_iter()
            .enumerate()
            .map(|(index, key)| {
                let kind = key.kind();
                key.into_public_key().ok_or_else(|| {
                    log::debug!("rejecting multisig key {}: got {}", index, kind);
                    ScriptError::InvalidKeyType { index, kind }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if m == 0 {
            log::debug!("rejecting multisig with zero required signatures");
            return Err(ScriptError::ZeroThreshold);
        }

        let script = assemble(m, &keys)?;
        log::trace!("built {}-of-{} redeem script ({} bytes)", m, n, script.len());

        Ok(RedeemScript {
            script,
            required_signatures: m,
            keys,
        })
    }

    /// Build a redeem script from a slice of public keys.
    pub fn from_public_keys(
        required_signatures: usize,
        keys: &[PublicKey],
    ) -> Result<Self, ScriptError> {
        Self::new(required_signatures, keys)
    }

    /// Parse a redeem script in [`ParseMode::Strict`] mode.
    pub fn from_script(script: &Script) -> Result<Self, ScriptError> {
        Self::from_script_with_mode(script, ParseMode::Strict)
    }

    /// Parse a hex-encoded redeem script in [`ParseMode::Strict`] mode.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Self::from_script(&Script::from_hex(hex_str)?)
    }

    /// Recover the threshold and keys from a redeem script.
    ///
    /// The first item must be one of `OP_1..=OP_16`. Every item between it
    /// and the last two must be a data push holding a SEC1 public key. The
    /// result is rebuilt through [`RedeemScript::new`], so the usual bounds
    /// apply to the recovered keys.
    ///
    /// # Arguments
    /// * `script` - The raw redeem script.
    /// * `mode` - Whether to also verify the trailer and canonical encoding.
    ///
    /// # Returns
    /// The parsed script. `NotMultisig` if the overall shape is wrong,
    /// `UnableToLoadPublicKey` if a key position is not a push,
    /// `Primitives` if pushed bytes are not a valid public key, and in
    /// strict mode `KeyCountMismatch` or `NonCanonicalScript`.
    pub fn from_script_with_mode(script: &Script, mode: ParseMode) -> Result<Self, ScriptError> {
        let chunks = script.chunks()?;

        let (first, rest) = chunks
            .split_first()
            .ok_or_else(|| not_multisig("empty script".to_string()))?;
        let m = first.small_int().ok_or_else(|| {
            not_multisig(format!("first item {} is not OP_1..OP_16", first.to_asm_string()))
        })?;
        if rest.len() < 2 {
            return Err(not_multisig(format!("only {} items", chunks.len())));
        }
        let (key_items, trailer) = rest.split_at(rest.len() - 2);

        let keys = key_items
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                // Item 0 is OP_m.
                let index = i + 1;
                let data = chunk.data().ok_or_else(|| {
                    log::debug!("redeem script item {} is {}, not a push", index, chunk.to_asm_string());
                    ScriptError::UnableToLoadPublicKey(index)
                })?;
                Ok(PublicKey::from_bytes(data)?)
            })
            .collect::<Result<Vec<_>, ScriptError>>()?;

        if mode == ParseMode::Strict {
            check_trailer(trailer, keys.len())?;
        }

        let redeem = Self::new(m, keys)?;

        if mode == ParseMode::Strict && redeem.script != *script {
            log::debug!("redeem script {} is not canonically encoded", script);
            return Err(ScriptError::NonCanonicalScript);
        }
        Ok(redeem)
    }

    /// The number of signatures required to spend (`m`).
    pub fn required_signatures(&self) -> usize {
        self.required_signatures
    }

    /// The number of public keys (`n`).
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// The public keys in script order.
    pub fn keys(&self) -> &[PublicKey] {
        &self.keys
    }

    /// The public key at `index`.
    pub fn key(&self, index: usize) -> Result<&PublicKey, ScriptError> {
        self.keys
            .get(index)
            .ok_or(ScriptError::KeyIndexOutOfRange(index))
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn to_bytes(&self) -> &[u8] {
        self.script.to_bytes()
    }

    pub fn to_hex(&self) -> String {
        self.script.to_hex()
    }

    /// Hash160 of the redeem script bytes.
    pub fn script_hash(&self) -> [u8; 20] {
        self.script.script_hash()
    }

    /// The pay-to-script-hash output script locking funds to this script.
    ///
    /// `OP_HASH160 <hash160(script)> OP_EQUAL`
    pub fn output_script(&self) -> Script {
        Script::pay_to_script_hash(&self.script)
    }

    /// The P2SH address of this script on `network`.
    pub fn address(&self, network: Network) -> Address {
        Address::from_script_hash(&self.script_hash(), network)
    }
}

impl fmt::Display for RedeemScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.script)
    }
}

impl From<RedeemScript> for Script {
    fn from(redeem: RedeemScript) -> Self {
        redeem.script
    }
}

impl TryFrom<&Script> for RedeemScript {
    type Error = ScriptError;

    fn try_from(script: &Script) -> Result<Self, Self::Error> {
        Self::from_script(script)
    }
}

impl serde::Serialize for RedeemScript {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for RedeemScript {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RedeemScript::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Emit `OP_m <keys...> OP_n OP_CHECKMULTISIG`. Bounds are checked by the caller.
fn assemble(m: usize, keys: &[PublicKey]) -> Result<Script, ScriptError> {
    let op_m = small_int_opcode(m).ok_or(ScriptError::ZeroThreshold)?;
    let op_n = small_int_opcode(keys.len()).ok_or(ScriptError::TooManyKeys(keys.len()))?;

    let mut script = Script::new();
    script.append_opcodes(&[op_m])?;
    for key in keys {
        script.append_push_data(&key.to_bytes())?;
    }
    script.append_opcodes(&[op_n, OP_CHECKMULTISIG])?;
    Ok(script)
}

fn check_trailer(trailer: &[ScriptChunk], key_pushes: usize) -> Result<(), ScriptError> {
    let (count, last) = match trailer {
        [count, last] => (count, last),
        _ => return Err(not_multisig("missing OP_n OP_CHECKMULTISIG".to_string())),
    };
    if *last != ScriptChunk::Op(OP_CHECKMULTISIG) {
        return Err(not_multisig(format!(
            "last item {} is not OP_CHECKMULTISIG",
            last.to_asm_string()
        )));
    }
    let declared = count.small_int().ok_or_else(|| {
        not_multisig(format!("key count item {} is not OP_1..OP_16", count.to_asm_string()))
    })?;
    if declared != key_pushes {
        log::debug!("redeem script declares {} keys but pushes {}", declared, key_pushes);
        return Err(ScriptError::KeyCountMismatch {
            declared,
            actual: key_pushes,
        });
    }
    Ok(())
}

fn not_multisig(reason: String) -> ScriptError {
    log::debug!("not a multisig redeem script: {}", reason);
    ScriptError::NotMultisig(reason)
}
