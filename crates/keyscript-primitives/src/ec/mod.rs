/// Elliptic curve keys on secp256k1.
///
/// Private keys carry the compression flag used when they are exported as
/// WIF; public keys remember the SEC1 form they were created from.

pub mod key;
pub mod private_key;
pub mod public_key;

pub use key::Key;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
