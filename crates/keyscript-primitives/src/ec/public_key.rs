//! secp256k1 public key.
//!
//! Keeps the SEC1 form (33-byte compressed or 65-byte uncompressed) the key
//! was created with, since scripts commit to the exact bytes pushed.

use k256::ecdsa::VerifyingKey;
use std::fmt;

use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key with a fixed serialized form.
#[derive(Clone, Debug)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
    /// Whether `to_bytes` yields the 33-byte compressed encoding.
    compressed: bool,
}

impl PublicKey {
    /// Create a PublicKey from SEC1 encoded bytes.
    ///
    /// Accepts compressed (33-byte, prefix 0x02/0x03) and uncompressed
    /// (65-byte, prefix 0x04) encodings and remembers which one was given.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or `InvalidPublicKey` if the length is
    /// not 33 or 65, the prefix does not match the length, or the bytes are
    /// not a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let compressed = match bytes.len() {
            COMPRESSED_LEN if matches!(bytes[0], 0x02 | 0x03) => true,
            UNCOMPRESSED_LEN if bytes[0] == 0x04 => false,
            COMPRESSED_LEN | UNCOMPRESSED_LEN => {
                return Err(PrimitivesError::InvalidPublicKey(format!(
                    "invalid prefix {:#04x} for {}-byte key",
                    bytes[0],
                    bytes.len()
                )))
            }
            0 => {
                return Err(PrimitivesError::InvalidPublicKey(
                    "pubkey bytes are empty".to_string(),
                ))
            }
            n => {
                return Err(PrimitivesError::InvalidPublicKey(format!(
                    "expected {} or {} bytes, got {}",
                    COMPRESSED_LEN, UNCOMPRESSED_LEN, n
                )))
            }
        };
        let inner = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner, compressed })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string (66 or 130 chars).
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Whether this key serializes in compressed form.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Serialize the key in the form it was created with.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.to_encoded_point(self.compressed).as_bytes().to_vec()
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the
    /// 32-byte X coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Lowercase hex of [`to_bytes`](Self::to_bytes).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Hash160 of the serialized key, as committed to by P2PKH outputs.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_bytes())
    }

    /// Construct a PublicKey from a k256 `VerifyingKey`.
    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey, compressed: bool) -> Self {
        PublicKey { inner: *vk, compressed }
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
