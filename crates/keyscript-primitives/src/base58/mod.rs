//! Base58 and Base58Check encoding.
//!
//! Raw Base58 uses the bitcoin alphabet via `bs58`. Base58Check appends the
//! first four bytes of SHA-256d(payload) before encoding and verifies them
//! on decode. WIF strings and addresses are both Base58Check.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Number of checksum bytes appended by Base58Check.
pub const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string.
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or `InvalidBase58` for characters outside
/// the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode `data` followed by its 4-byte SHA-256d checksum.
///
/// # Arguments
/// * `data` - The payload, typically a version byte followed by key or hash bytes.
///
/// # Returns
/// A Base58Check-encoded string.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a Base58Check string and verify its checksum.
///
/// # Arguments
/// * `s` - The Base58Check string to decode.
///
/// # Returns
/// The payload without the checksum, `InvalidBase58` if the string is not
/// Base58 or too short to carry a checksum, or `ChecksumMismatch` if the
/// trailing four bytes do not match.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    let expected = sha256d(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        log::debug!("base58check checksum mismatch for {}-byte payload", payload.len());
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}
