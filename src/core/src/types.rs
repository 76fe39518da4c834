//! Core types for the wallet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of an ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of a private key: the 32-byte secret seed followed by the public key.
pub const PRIVATE_KEY_LENGTH: usize = 64;

/// Length of an ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of a ledger address.
pub const ADDRESS_LENGTH: usize = 20;

/// Coin amount, gas price and gas limit, in the smallest indivisible unit.
pub type Amount = u64;

/// Per-sender sequence number, as reported by the node.
pub type Nonce = u64;

/// A 20-byte ledger address, the trailing bytes of a public key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    /// Derives the address of a public key.
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self::from_slice(public_key)
    }

    /// Builds an address from the last 20 bytes of `bytes`, left-padding
    /// shorter input with zeros.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut address = [0u8; ADDRESS_LENGTH];
        if bytes.len() >= ADDRESS_LENGTH {
            address.copy_from_slice(&bytes[bytes.len() - ADDRESS_LENGTH..]);
        } else {
            address[ADDRESS_LENGTH - bytes.len()..].copy_from_slice(bytes);
        }
        Self(address)
    }

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Error returned when parsing an address from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAddressError(pub String);

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid address: {}", self.0)
    }
}

impl std::error::Error for ParseAddressError {}

impl FromStr for Address {
    type Err = ParseAddressError;

    /// Accepts a hex address, or a hex public key from which the address is derived.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| ParseAddressError(e.to_string()))?;

        match bytes.len() {
            ADDRESS_LENGTH | PUBLIC_KEY_LENGTH => Ok(Self::from_slice(&bytes)),
            n => Err(ParseAddressError(format!(
                "expected {} or {} bytes, got {}",
                ADDRESS_LENGTH, PUBLIC_KEY_LENGTH, n
            ))),
        }
    }
}

/// Signature, represented as a 64-byte array.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Returns the raw signature bytes.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}

// Serialized as a fixed 64-element tuple, so that no length prefix ends up in
// the canonical transaction bytes.
impl serde::Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;

        let mut tuple = serializer.serialize_tuple(SIGNATURE_LENGTH)?;
        for byte in self.0.iter() {
            tuple.serialize_element(byte)?;
        }
        tuple.end()
    }
}

impl<'de> serde::Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SignatureVisitor;

        impl<'de> serde::de::Visitor<'de> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 64-byte signature")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut signature = [0u8; SIGNATURE_LENGTH];
                for (i, byte) in signature.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Signature(signature))
            }
        }

        deserializer.deserialize_tuple(SIGNATURE_LENGTH, SignatureVisitor)
    }
}
