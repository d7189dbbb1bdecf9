//! secp256k1 private key.
//!
//! Wraps a k256 signing key together with the compression flag that decides
//! how the matching public key is represented and whether the WIF encoding
//! carries the trailing compression marker.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::ec::public_key::PublicKey;
use crate::wif::{self, NetworkTag};
use crate::PrimitivesError;

/// Length of a serialized private key scalar in bytes.
pub const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A secp256k1 private key scalar plus its public key compression flag.
///
/// The scalar is always exactly 32 bytes; the flag only affects encoding.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
    /// Whether the corresponding public key is used in compressed form.
    compressed: bool,
}

impl PrivateKey {
    /// Generate a new random, compressed private key using the OS RNG.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
            compressed: true,
        }
    }

    /// Create a compressed private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes are a valid secp256k1 scalar, or
    /// `InvalidPrivateKey` if the length is wrong or the scalar is zero or
    /// not below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey {
            inner,
            compressed: true,
        })
    }

    /// Create a compressed private key from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Return a copy of this key with the given compression flag.
    pub fn with_compression(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    /// Whether the public key for this private key is represented compressed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Parse a WIF string, discarding its network tag.
    ///
    /// Use [`wif::parse`] when the tag matters.
    pub fn from_wif(wif_str: &str) -> Result<Self, PrimitivesError> {
        Ok(wif::parse(wif_str)?.private_key)
    }

    /// Encode the key as WIF with the mainnet tag (0x80).
    pub fn to_wif(&self) -> String {
        self.to_wif_with_network(NetworkTag::MAINNET)
    }

    /// Encode the key as WIF with the given network tag.
    pub fn to_wif_with_network(&self, network: NetworkTag) -> String {
        wif::serialize(network, self)
    }

    /// Serialize the scalar as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_BYTES_LEN] {
        let mut out = [0u8; PRIVATE_KEY_BYTES_LEN];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the scalar as a lowercase 64-character hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key.
    ///
    /// The public key uses the compressed or uncompressed form according to
    /// this key's compression flag.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key(), self.compressed)
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.compressed == other.compressed && self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d";

    #[test]
    fn test_from_bytes_roundtrip() {
        let bytes = hex::decode(KEY_HEX).unwrap();
        let key = PrivateKey::from_bytes(&bytes).unwrap();
        assert_eq!(key.to_bytes().to_vec(), bytes);
        assert_eq!(key.to_hex(), KEY_HEX);
        assert!(key.is_compressed());
    }

    #[test]
    fn test_from_bytes_rejects_bad_lengths() {
        assert!(PrivateKey::from_bytes(&[0x01; 31]).is_err());
        assert!(PrivateKey::from_bytes(&[0x01; 33]).is_err());
    }

    #[test]
    fn test_from_bytes_rejects_zero_scalar() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_from_invalid_hex() {
        assert!(PrivateKey::from_hex("").is_err());
        let wif = "L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq";
        assert!(PrivateKey::from_hex(wif).is_err());
    }

    #[test]
    fn test_wif_known_vectors() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        assert_eq!(
            key.clone().with_compression(false).to_wif(),
            "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ"
        );
        assert_eq!(
            key.to_wif(),
            "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617"
        );
    }

    #[test]
    fn test_wif_roundtrip_keeps_compression() {
        let key = PrivateKey::new().with_compression(false);
        let decoded = PrivateKey::from_wif(&key.to_wif()).unwrap();
        assert_eq!(key, decoded);
        assert!(!decoded.is_compressed());
    }

    #[test]
    fn test_from_invalid_wif() {
        // modified character
        assert!(PrivateKey::from_wif("L401GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq").is_err());
        // truncated
        assert!(PrivateKey::from_wif("L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkW").is_err());
    }

    #[test]
    fn test_equality_includes_compression() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        assert_ne!(key.clone(), key.with_compression(false));
    }

    #[test]
    fn test_pub_key_follows_compression() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        assert_eq!(
            key.pub_key().to_hex(),
            "02d0de0aaeaefad02b8bdc8a01a1b8b11c696bd3d66a2c5f10780d95b7df42645c"
        );
        assert_eq!(key.with_compression(false).pub_key().to_bytes().len(), 65);
    }
}
