//! Reproducible key generation and signing driven by [`ShakeDrbg`].
//!
//! Key pairs are derived from a 32-byte master seed plus a personalization
//! string, so a host can regenerate the same key (per epoch, per role, ...)
//! from stored seed material. Signatures use "coins" that are either
//! supplied by the caller or derived from the secret key and the message,
//! which makes them fully reproducible for audit.
//!
//! Never reuse the same coins for two different messages.

use crate::drbg::ShakeDrbg;
use crate::error::SchemeError;
use crate::keys::{KeyPair, SecretKey, Signature};
use crate::seeded;
use crate::xof::derive_key;

const LABEL_KEYGEN: &[u8] = b"FALCON/KEYGEN";
const LABEL_COINS: &[u8] = b"FALCON/SIGN/COINS";

/// Derive the key pair belonging to `seed` and `personalization`.
pub fn keypair_from_seed(seed: &[u8; 32], personalization: &[u8]) -> Result<KeyPair, SchemeError> {
    let key = derive_key(seed, LABEL_KEYGEN, personalization);
    seeded::generate_keypair(ShakeDrbg::from_key(key, personalization))
}

/// Derive signing coins bound to `secret_key` and `message`.
///
/// The first 32 bytes of the encoded secret key act as the PRF key.
pub fn derive_coins(secret_key: &SecretKey, message: &[u8]) -> [u8; 32] {
    derive_key(&secret_key.as_bytes()[..32], LABEL_COINS, message)
}

/// Sign `message` with randomness expanded from `coins`.
pub fn sign_with_coins(
    secret_key: &SecretKey,
    message: &[u8],
    coins: &[u8; 32],
    personalization: &[u8],
) -> Result<Signature, SchemeError> {
    seeded::sign(message, secret_key, ShakeDrbg::new(coins, personalization))
}

/// Sign `message` with coins derived from the key and the message
/// themselves: the same inputs always produce the same signature.
pub fn sign_derandomized(
    secret_key: &SecretKey,
    message: &[u8],
    personalization: &[u8],
) -> Result<Signature, SchemeError> {
    let coins = zeroize::Zeroizing::new(derive_coins(secret_key, message));
    sign_with_coins(secret_key, message, &coins, personalization)
}
