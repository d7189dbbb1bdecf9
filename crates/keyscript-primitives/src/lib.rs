/// Key primitives for the keyscript toolkit.
///
/// This crate provides the building blocks the script crate combines:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Base58 and Base58Check encoding/decoding
/// - secp256k1 private and public keys
/// - Wallet Import Format (WIF) private key encoding

pub mod hash;
pub mod base58;
pub mod ec;
pub mod wif;

mod error;
pub use error::PrimitivesError;
pub use wif::{NetworkTag, Wif};
