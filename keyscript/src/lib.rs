#![deny(missing_docs)]

//! keyscript - WIF private keys and multisig redeem scripts.
//!
//! Re-exports the workspace crates for convenient single-crate usage.

pub use keyscript_primitives as primitives;
pub use keyscript_script as script;

pub use keyscript_primitives::ec::{Key, PrivateKey, PublicKey};
pub use keyscript_primitives::{NetworkTag, PrimitivesError, Wif};
pub use keyscript_script::{Network, ParseMode, RedeemScript, Script, ScriptError};
