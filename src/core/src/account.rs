//! Local accounts: an operator-chosen alias plus an ed25519 key pair.

use crate::errors::CoreError;
use crate::types::{Address, Signature, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH};
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer, Verifier};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

/// A single local account.
///
/// The private key is stored as the 32-byte secret seed followed by the
/// 32-byte public key. The address is never stored; it is always derived from
/// the public key.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    alias: String,
    public_key: [u8; PUBLIC_KEY_LENGTH],
    private_key: [u8; PRIVATE_KEY_LENGTH],
}

impl Account {
    /// Creates an account with a fresh key pair drawn from the OS random source.
    pub fn generate(alias: &str) -> Result<Self, CoreError> {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);

        let secret = SecretKey::from_bytes(&seed).map_err(|e| CoreError::Signing(e.to_string()))?;
        let public = PublicKey::from(&secret);

        let mut private_key = [0u8; PRIVATE_KEY_LENGTH];
        private_key[..32].copy_from_slice(secret.as_bytes());
        private_key[32..].copy_from_slice(public.as_bytes());

        Ok(Self {
            alias: alias.to_string(),
            public_key: public.to_bytes(),
            private_key,
        })
    }

    /// Rebuilds an account from stored key material, checking that the two
    /// halves belong together.
    pub fn from_keys(
        alias: &str,
        public_key: [u8; PUBLIC_KEY_LENGTH],
        private_key: [u8; PRIVATE_KEY_LENGTH],
    ) -> Result<Self, CoreError> {
        let account = Self {
            alias: alias.to_string(),
            public_key,
            private_key,
        };
        account.keypair()?;
        Ok(account)
    }

    /// Builds an account without validating the key material.
    #[cfg(test)]
    pub(crate) fn from_raw_parts(
        alias: &str,
        public_key: [u8; PUBLIC_KEY_LENGTH],
        private_key: [u8; PRIVATE_KEY_LENGTH],
    ) -> Self {
        Self {
            alias: alias.to_string(),
            public_key,
            private_key,
        }
    }

    /// Gets the alias.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Gets the public key.
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.public_key
    }

    /// Gets the private key.
    pub fn private_key(&self) -> &[u8; PRIVATE_KEY_LENGTH] {
        &self.private_key
    }

    /// Gets the ledger address of this account.
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key)
    }

    /// Gets the signing key pair, failing if the stored halves disagree.
    pub fn keypair(&self) -> Result<Keypair, CoreError> {
        let secret = SecretKey::from_bytes(&self.private_key[..32])
            .map_err(|e| CoreError::Signing(e.to_string()))?;
        let public = PublicKey::from(&secret);

        if public.as_bytes() != &self.public_key || self.private_key[32..] != self.public_key[..] {
            return Err(CoreError::Signing(format!(
                "private key of `{}` does not match its public key",
                self.alias
            )));
        }

        Ok(Keypair { secret, public })
    }

    /// Signs an arbitrary message with this account's private key.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, CoreError> {
        let keypair = self.keypair()?;
        Ok(Signature(keypair.sign(message).to_bytes()))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("alias", &self.alias)
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

/// Verifies `signature` over `message` under `public_key`.
pub fn verify_signature(
    public_key: &[u8; PUBLIC_KEY_LENGTH],
    message: &[u8],
    signature: &Signature,
) -> bool {
    let public = match PublicKey::from_bytes(public_key) {
        Ok(public) => public,
        Err(_) => return false,
    };
    let signature = match ed25519_dalek::Signature::try_from(&signature.0[..]) {
        Ok(signature) => signature,
        Err(_) => return false,
    };
    public.verify(message, &signature).is_ok()
}
