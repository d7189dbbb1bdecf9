//! The closed set of key values handled by the toolkit.

use std::fmt;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;

/// Any key value a caller may hand to a key-consuming API.
///
/// APIs that need one particular representation (for example, multisig
/// scripts require public keys) accept `Key` and reject the variants they
/// cannot use with a typed error instead of coercing them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Public(PublicKey),
    Private(PrivateKey),
}

impl Key {
    /// Return the public key if this value is one.
    pub fn as_public_key(&self) -> Option<&PublicKey> {
        match self {
            Key::Public(pk) => Some(pk),
            Key::Private(_) => None,
        }
    }

    /// Consume the value, returning the public key if this value is one.
    pub fn into_public_key(self) -> Option<PublicKey> {
        match self {
            Key::Public(pk) => Some(pk),
            Key::Private(_) => None,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Public(_) => "public key",
            Key::Private(_) => "private key",
        }
    }
}

impl From<PublicKey> for Key {
    fn from(pk: PublicKey) -> Self {
        Key::Public(pk)
    }
}

impl From<&PublicKey> for Key {
    fn from(pk: &PublicKey) -> Self {
        Key::Public(pk.clone())
    }
}

impl From<PrivateKey> for Key {
    fn from(sk: PrivateKey) -> Self {
        Key::Private(sk)
    }
}

impl fmt::Display for Key {
    /// Public keys render as hex; private keys only by kind.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Public(pk) => write!(f, "{}", pk),
            Key::Private(_) => f.write_str("<private key>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_variant() {
        let pk = PrivateKey::new().pub_key();
        let key = Key::from(&pk);
        assert_eq!(key.kind(), "public key");
        assert_eq!(key.as_public_key(), Some(&pk));
        assert_eq!(key.into_public_key(), Some(pk));
    }

    #[test]
    fn test_private_variant_is_not_public() {
        let key = Key::from(PrivateKey::new());
        assert_eq!(key.kind(), "private key");
        assert!(key.as_public_key().is_none());
        assert_eq!(key.to_string(), "<private key>");
    }
}
