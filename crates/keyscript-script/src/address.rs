/// Network parameters and Base58Check addresses.
///
/// Supports pay-to-public-key-hash and pay-to-script-hash addresses on
/// mainnet and testnet. Each network also owns the tag byte used for
/// WIF-encoded private keys.

use std::fmt;

use keyscript_primitives::base58;
use keyscript_primitives::ec::PublicKey;
use keyscript_primitives::NetworkTag;

use crate::opcodes::*;
use crate::{Script, ScriptError};

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;
/// Mainnet P2SH address version byte.
const MAINNET_P2SH: u8 = 0x05;
/// Testnet P2SH address version byte.
const TESTNET_P2SH: u8 = 0xc4;

/// Version byte plus a 20-byte hash.
const ADDRESS_PAYLOAD_LEN: usize = 21;

/// Bitcoin network type for prefix selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    /// Bitcoin mainnet (P2PKH '1...', P2SH '3...').
    Mainnet,
    /// Bitcoin testnet (P2PKH 'm...'/'n...', P2SH '2...').
    Testnet,
}

impl Network {
    /// Version byte of pay-to-public-key-hash addresses.
    pub fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_P2PKH,
            Network::Testnet => TESTNET_P2PKH,
        }
    }

    /// Version byte of pay-to-script-hash addresses.
    pub fn p2sh_version(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_P2SH,
            Network::Testnet => TESTNET_P2SH,
        }
    }

    /// Tag byte leading WIF private keys on this network.
    pub fn wif_tag(self) -> NetworkTag {
        match self {
            Network::Mainnet => NetworkTag::MAINNET,
            Network::Testnet => NetworkTag::TESTNET,
        }
    }

    /// Look up the network a WIF tag belongs to.
    pub fn from_wif_tag(tag: NetworkTag) -> Option<Network> {
        match tag {
            NetworkTag::MAINNET => Some(Network::Mainnet),
            NetworkTag::TESTNET => Some(Network::Testnet),
            _ => None,
        }
    }

    fn from_version(version: u8) -> Option<(Network, AddressKind)> {
        match version {
            MAINNET_P2PKH => Some((Network::Mainnet, AddressKind::P2PKH)),
            TESTNET_P2PKH => Some((Network::Testnet, AddressKind::P2PKH)),
            MAINNET_P2SH => Some((Network::Mainnet, AddressKind::P2SH)),
            TESTNET_P2SH => Some((Network::Testnet, AddressKind::P2SH)),
            _ => None,
        }
    }
}

/// What the 20-byte hash of an address commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Hash160 of a public key.
    P2PKH,
    /// Hash160 of a redeem script.
    P2SH,
}

/// A Base58Check address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// The 20-byte hash160 of the public key or script.
    pub hash: [u8; 20],
    /// Whether the hash is of a public key or a script.
    pub kind: AddressKind,
    /// The network this address belongs to.
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// Network and kind are detected from the version byte.
    ///
    /// # Arguments
    /// * `addr` - The Base58Check address string.
    ///
    /// # Returns
    /// An `Address`, or an error if the string is not Base58, fails the
    /// checksum, has the wrong length or an unknown version byte.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let payload = base58::check_decode(addr).map_err(|e| match e {
            keyscript_primitives::PrimitivesError::InvalidBase58(msg) => {
                ScriptError::InvalidAddress(format!("{} for '{}'", msg, addr))
            }
            other => ScriptError::Primitives(other),
        })?;

        if payload.len() != ADDRESS_PAYLOAD_LEN {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        let (network, kind) = Network::from_version(payload[0])
            .ok_or_else(|| ScriptError::UnsupportedAddress(addr.to_string()))?;

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&payload[1..]);

        Ok(Address {
            address_string: addr.to_string(),
            hash,
            kind,
            network,
        })
    }

    /// Create a P2PKH address from a 20-byte public key hash.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        Self::encode(hash, AddressKind::P2PKH, network)
    }

    /// Create a P2PKH address for a public key, hashing its own encoding.
    pub fn from_public_key(key: &PublicKey, network: Network) -> Self {
        Self::from_public_key_hash(&key.hash160(), network)
    }

    /// Create a P2SH address from a 20-byte script hash.
    pub fn from_script_hash(hash: &[u8; 20], network: Network) -> Self {
        Self::encode(hash, AddressKind::P2SH, network)
    }

    /// The output script paying to this address.
    pub fn locking_script(&self) -> Script {
        match self.kind {
            AddressKind::P2SH => Script::pay_to_script_hash_from_hash(&self.hash),
            AddressKind::P2PKH => {
                let mut bytes = Vec::with_capacity(25);
                bytes.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
                bytes.extend_from_slice(&self.hash);
                bytes.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
                Script::from_bytes(&bytes)
            }
        }
    }

    fn encode(hash: &[u8; 20], kind: AddressKind, network: Network) -> Self {
        let version = match kind {
            AddressKind::P2PKH => network.p2pkh_version(),
            AddressKind::P2SH => network.p2sh_version(),
        };

        let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_LEN);
        payload.push(version);
        payload.extend_from_slice(hash);

        Address {
            address_string: base58::check_encode(&payload),
            hash: *hash,
            kind,
            network,
        }
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}
