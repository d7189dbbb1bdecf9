/// Error types for script operations.
///
/// Covers script assembly and parsing, address handling, and multisig
/// redeem script construction, parsing and access.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Invalid opcode data encountered during ASM parsing.
    #[error("invalid opcode data")]
    InvalidOpcodeData,

    /// Attempted to append a push data opcode as a bare opcode.
    #[error("use append_push_data for push data opcodes: {0}")]
    InvalidOpcodeType(String),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds maximum allowed size.
    #[error("data too big")]
    DataTooBig,

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid address length after Base58Check decoding.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte not recognized.
    #[error("address not supported {0}")]
    UnsupportedAddress(String),

    /// More signatures required than keys supplied.
    #[error("required signatures ({required}) exceeds number of public keys ({keys})")]
    ThresholdExceedsKeyCount { required: usize, keys: usize },

    /// A multisig script can hold at most 16 keys.
    #[error("number of public keys ({0}) is greater than 16")]
    TooManyKeys(usize),

    /// A key value that is not a public key was given to the builder.
    #[error("key at index {index} must be a public key, got {kind}")]
    InvalidKeyType { index: usize, kind: &'static str },

    /// A multisig script must require at least one signature.
    #[error("required signatures must be at least 1")]
    ZeroThreshold,

    /// A redeem script item where a public key was expected is not a data push.
    #[error("unable to load public key at script item {0}")]
    UnableToLoadPublicKey(usize),

    /// Key lookup by index failed.
    #[error("no key at index {0}")]
    KeyIndexOutOfRange(usize),

    /// Script does not have the OP_m <keys> OP_n OP_CHECKMULTISIG shape.
    #[error("not a multisig redeem script: {0}")]
    NotMultisig(String),

    /// Declared key count disagrees with the keys actually pushed.
    #[error("script declares {declared} public keys but pushes {actual}")]
    KeyCountMismatch { declared: usize, actual: usize },

    /// Script parses as multisig but is not the canonical encoding.
    #[error("redeem script is not canonically encoded")]
    NonCanonicalScript,

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] keyscript_primitives::PrimitivesError),
}
