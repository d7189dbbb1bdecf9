/// Unified error type for all primitives operations.
///
/// Covers errors from key parsing, Base58Check decoding and WIF handling.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// WIF payload (after the network tag) was neither 32 nor 33 bytes.
    #[error("malformed private key: payload is {0} bytes, expected 32 or 33")]
    MalformedPrivateKey(usize),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("network mismatch: expected tag {expected:#04x}, got {got:#04x}")]
    NetworkMismatch { expected: u8, got: u8 },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
