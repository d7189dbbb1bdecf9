/// Script assembly, addresses and multisig redeem scripts.
///
/// Provides the opcode table, script chunk parsing, the `Script` byte type,
/// network parameters with Base58Check addresses, and the `m`-of-`n`
/// multisig redeem script builder and parser.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod address;
pub mod multisig;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use address::{Address, AddressKind, Network};
pub use chunk::ScriptChunk;
pub use multisig::{ParseMode, RedeemScript, MAX_MULTISIG_KEYS};
