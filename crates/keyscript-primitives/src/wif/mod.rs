//! Wallet Import Format (WIF) private key encoding.
//!
//! A WIF string is the Base58Check encoding of
//! `network tag (1) || scalar (32) || [0x01 if compressed]`.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroize;

use crate::base58;
use crate::ec::private_key::{PrivateKey, PRIVATE_KEY_BYTES_LEN};
use crate::PrimitivesError;

/// Marker byte appended to the payload when the public key is compressed.
pub const COMPRESS_MAGIC: u8 = 0x01;

/// One-byte network identifier leading a WIF payload.
///
/// Distinct from the address version bytes of the same network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NetworkTag(pub u8);

impl NetworkTag {
    /// Bitcoin mainnet private key tag.
    pub const MAINNET: NetworkTag = NetworkTag(0x80);
    /// Testnet private key tag.
    pub const TESTNET: NetworkTag = NetworkTag(0xef);

    pub fn byte(self) -> u8 {
        self.0
    }
}

impl fmt::Display for NetworkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// A decoded WIF string: the network tag it carried and the private key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wif {
    pub network: NetworkTag,
    pub private_key: PrivateKey,
}

impl Wif {
    /// Return the private key if it was encoded for `expected`.
    ///
    /// # Returns
    /// `NetworkMismatch` when the tag differs.
    pub fn require_network(self, expected: NetworkTag) -> Result<PrivateKey, PrimitivesError> {
        if self.network != expected {
            log::debug!("WIF network tag {} does not match expected {}", self.network, expected);
            return Err(PrimitivesError::NetworkMismatch {
                expected: expected.0,
                got: self.network.0,
            });
        }
        Ok(self.private_key)
    }
}

impl fmt::Display for Wif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self.network, &self.private_key))
    }
}

impl FromStr for Wif {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Encode a private key as WIF for the given network tag.
///
/// The compression marker is appended iff `key.is_compressed()`.
///
/// # Arguments
/// * `network` - The network tag byte to lead the payload with.
/// * `key` - The private key to encode.
///
/// # Returns
/// The Base58Check-encoded WIF string.
pub fn serialize(network: NetworkTag, key: &PrivateKey) -> String {
    let mut payload = Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 1);
    payload.push(network.0);
    let mut scalar = key.to_bytes();
    payload.extend_from_slice(&scalar);
    scalar.zeroize();
    if key.is_compressed() {
        payload.push(COMPRESS_MAGIC);
    }

    let encoded = base58::check_encode(&payload);
    payload.zeroize();
    encoded
}

/// Decode and checksum-verify a WIF string.
///
/// The network tag is returned as-is; comparing it against an expected
/// network is up to the caller (see [`Wif::require_network`]).
///
/// # Arguments
/// * `wif` - The Base58Check WIF string.
///
/// # Returns
/// The decoded [`Wif`], `ChecksumMismatch` if the checksum fails,
/// `MalformedPrivateKey` if the payload after the tag is neither 32 nor 33
/// bytes, or `InvalidPrivateKey` if the scalar is out of range.
pub fn parse(wif: &str) -> Result<Wif, PrimitivesError> {
    let mut payload = base58::check_decode(wif)?;
    let result = parse_payload(&payload);
    payload.zeroize();
    result
}

fn parse_payload(payload: &[u8]) -> Result<Wif, PrimitivesError> {
    let (&tag, key_bytes) = payload
        .split_first()
        .ok_or(PrimitivesError::MalformedPrivateKey(0))?;

    // Only the marker's presence matters, not its value.
    let compressed = match key_bytes.len() {
        PRIVATE_KEY_BYTES_LEN => false,
        len if len == PRIVATE_KEY_BYTES_LEN + 1 => true,
        len => {
            log::debug!("rejecting WIF payload with {} key bytes", len);
            return Err(PrimitivesError::MalformedPrivateKey(len));
        }
    };

    let private_key = PrivateKey::from_bytes(&key_bytes[..PRIVATE_KEY_BYTES_LEN])?
        .with_compression(compressed);
    log::trace!("parsed WIF for network {} (compressed: {})", NetworkTag(tag), compressed);

    Ok(Wif {
        network: NetworkTag(tag),
        private_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d";

    fn key() -> PrivateKey {
        PrivateKey::from_hex(KEY_HEX).unwrap()
    }

    #[test]
    fn test_serialize_vectors() {
        let cases = [
            (NetworkTag::MAINNET, false, "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ"),
            (NetworkTag::MAINNET, true, "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617"),
            (NetworkTag::TESTNET, false, "91gGn1HgSap6CbU12F6z3pJri26xzp7Ay1VW6NHCoEayNXwRpu2"),
            (NetworkTag::TESTNET, true, "cMzLdeGd5vEqxB8B6VFQoRopQ3sLAAvEzDAoQgvX54xwofSWj1fx"),
        ];
        for (tag, compressed, expected) in cases {
            let k = key().with_compression(compressed);
            assert_eq!(serialize(tag, &k), expected);

            let decoded = parse(expected).unwrap();
            assert_eq!(decoded.network, tag);
            assert_eq!(decoded.private_key, k);
        }
    }

    #[test]
    fn test_payload_length_rejected() {
        for len in [0usize, 1, 31, 34, 64] {
            let mut payload = vec![NetworkTag::MAINNET.0];
            payload.extend(std::iter::repeat(0x11).take(len));
            let result = parse(&base58::check_encode(&payload));
            assert!(
                matches!(result, Err(PrimitivesError::MalformedPrivateKey(n)) if n == len),
                "length {}: {:?}",
                len,
                result
            );
        }
    }

    #[test]
    fn test_empty_payload_rejected() {
        let result = parse(&base58::check_encode(&[]));
        assert!(matches!(result, Err(PrimitivesError::MalformedPrivateKey(0))));
    }

    #[test]
    fn test_checksum_byte_flip_rejected() {
        let wif = serialize(NetworkTag::MAINNET, &key());
        let raw = base58::decode(&wif).unwrap();
        for offset in 1..=base58::CHECKSUM_LEN {
            let mut tampered = raw.clone();
            let idx = tampered.len() - offset;
            tampered[idx] ^= 0xff;
            let result = parse(&base58::encode(&tampered));
            assert!(
                matches!(result, Err(PrimitivesError::ChecksumMismatch)),
                "checksum byte -{}: {:?}",
                offset,
                result
            );
        }
    }

    #[test]
    fn test_marker_value_not_inspected() {
        let mut payload = vec![NetworkTag::MAINNET.0];
        payload.extend_from_slice(&key().to_bytes());
        payload.push(0x07);
        let decoded = parse(&base58::check_encode(&payload)).unwrap();
        assert!(decoded.private_key.is_compressed());
        assert_eq!(decoded.private_key.to_hex(), KEY_HEX);
    }

    #[test]
    fn test_out_of_range_scalar_rejected() {
        let mut payload = vec![NetworkTag::MAINNET.0];
        payload.extend_from_slice(&[0u8; 32]);
        let result = parse(&base58::check_encode(&payload));
        assert!(matches!(result, Err(PrimitivesError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_arbitrary_tag_is_preserved() {
        let tag = NetworkTag(0x42);
        let decoded = parse(&serialize(tag, &key())).unwrap();
        assert_eq!(decoded.network, tag);
    }

    #[test]
    fn test_require_network() {
        let wif: Wif = "cMzLdeGd5vEqxB8B6VFQoRopQ3sLAAvEzDAoQgvX54xwofSWj1fx".parse().unwrap();
        assert!(wif.clone().require_network(NetworkTag::TESTNET).is_ok());
        let result = wif.require_network(NetworkTag::MAINNET);
        assert!(matches!(
            result,
            Err(PrimitivesError::NetworkMismatch { expected: 0x80, got: 0xef })
        ));
    }

    #[test]
    fn test_display_matches_serialize() {
        let wif = Wif {
            network: NetworkTag::MAINNET,
            private_key: key(),
        };
        assert_eq!(wif.to_string(), "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617");
    }
}
