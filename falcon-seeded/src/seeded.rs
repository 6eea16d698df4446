//! Key generation and signing with a caller-supplied entropy source.
//!
//! Each entropy-consuming call builds its own [`EntropySlot`], installs the
//! source and only then runs the Falcon routine, so the routine can never
//! see a source from some earlier, unrelated call. The slot lives on the
//! caller's stack and is dropped when the call returns; nothing is shared
//! between threads.
//!
//! The `*_in` variants take the slot from the caller instead. They exist
//! for hosts that manage the slot themselves, for example to inspect
//! [`EntropySlot::bytes_served`] afterwards or to run an operation against a
//! deliberately empty slot.

use tracing::debug;

use crate::entropy::{EntropySlot, FillBytes};
use crate::error::SchemeError;
use crate::keys::{KeyPair, PublicKey, SecretKey, Signature};
use crate::scheme;

/// Generate a key pair whose randomness comes entirely from `fill`.
///
/// Two sources producing the same byte stream yield the same key pair.
pub fn generate_keypair<F: FillBytes>(mut fill: F) -> Result<KeyPair, SchemeError> {
    let mut slot = EntropySlot::new();
    slot.set(&mut fill);
    generate_keypair_in(&mut slot)
}

/// Generate a key pair from whatever `slot` currently holds.
///
/// An empty slot yields the key pair of an all-zero entropy stream.
pub fn generate_keypair_in(slot: &mut EntropySlot<'_>) -> Result<KeyPair, SchemeError> {
    debug!(installed = slot.is_installed(), "falcon512 keygen");
    let before = slot.bytes_served();
    let pair = scheme::keygen(slot);
    debug!(entropy = slot.bytes_served() - before, "falcon512 keygen done");
    Ok(pair)
}

/// Sign `message` with `secret_key`, drawing the signing randomness from
/// `fill`.
pub fn sign<F: FillBytes>(
    message: &[u8],
    secret_key: &SecretKey,
    mut fill: F,
) -> Result<Signature, SchemeError> {
    let mut slot = EntropySlot::new();
    slot.set(&mut fill);
    sign_in(&mut slot, message, secret_key)
}

/// Sign `message` using the source currently held by `slot`.
pub fn sign_in(
    slot: &mut EntropySlot<'_>,
    message: &[u8],
    secret_key: &SecretKey,
) -> Result<Signature, SchemeError> {
    debug!(
        msg_len = message.len(),
        installed = slot.is_installed(),
        "falcon512 sign"
    );
    let before = slot.bytes_served();
    let signature = scheme::sign(slot, message, secret_key)?;
    debug!(
        sig_len = signature.len(),
        entropy = slot.bytes_served() - before,
        "falcon512 sign done"
    );
    Ok(signature)
}

/// Verify `signature` over `message` against `public_key`.
///
/// Consumes no randomness. A signature made for another message or key
/// gives `Ok(false)`; only an undecodable public key is an error.
pub fn verify(
    message: &[u8],
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<bool, SchemeError> {
    let valid = scheme::verify(message, signature, public_key)?;
    debug!(msg_len = message.len(), valid, "falcon512 verify");
    Ok(valid)
}

/// Like [`verify`], for callers holding raw encodings.
///
/// Wrong lengths are reported as errors rather than as a failed
/// verification.
pub fn verify_bytes(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<bool, SchemeError> {
    let signature = Signature::from_bytes(signature)?;
    let public_key = PublicKey::from_bytes(public_key)?;
    verify(message, &signature, &public_key)
}
