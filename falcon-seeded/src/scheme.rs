//! Falcon-512 key generation, signing and verification.
//!
//! The lattice mathematics lives in the `fn-dsa` crate; this module only
//! fixes the parameter set, sizes the buffers and turns its outcomes into
//! [`SchemeError`]s. Randomness is never taken from the environment: key
//! generation and signing draw every byte from the generator passed in.
//! Messages are hashed the way the original Falcon submission does
//! (no pre-hash, no domain context), so signatures interoperate with other
//! Falcon-512 implementations that use the same key encodings.

use fn_dsa::{
    KeyPairGenerator, KeyPairGenerator512, SigningKey, SigningKey512, VerifyingKey,
    VerifyingKey512, DOMAIN_NONE, FN_DSA_LOGN_512, HASH_ID_ORIGINAL_FALCON,
};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::SchemeError;
use crate::keys::{KeyPair, PublicKey, SecretKey, Signature};

/// Encoded public key length.
pub const PUBLIC_KEY_LEN: usize = 897;

/// Encoded secret key length.
pub const SECRET_KEY_LEN: usize = 1281;

/// Signature length. Signatures are padded, so every signature produced
/// here is exactly this long.
pub const SIGNATURE_MAX_LEN: usize = 666;

/// Generate a key pair, drawing all randomness from `rng`.
///
/// Falcon key generation has no failure outcome: candidates that do not
/// yield a valid basis are rejected and resampled inside `fn-dsa`.
pub fn keygen<R: CryptoRng + RngCore>(rng: &mut R) -> KeyPair {
    let mut generator = KeyPairGenerator512::default();
    let mut sk = Zeroizing::new([0u8; SECRET_KEY_LEN]);
    let mut pk = [0u8; PUBLIC_KEY_LEN];

    generator.keygen(FN_DSA_LOGN_512, rng, &mut sk[..], &mut pk);

    KeyPair {
        public: PublicKey::from_array(pk),
        secret: SecretKey::from_array(*sk),
    }
}

/// Sign `message`, drawing the nonce and sampler seed from `rng`.
pub fn sign<R: CryptoRng + RngCore>(
    rng: &mut R,
    message: &[u8],
    secret_key: &SecretKey,
) -> Result<Signature, SchemeError> {
    let mut signing_key =
        SigningKey512::decode(secret_key.as_bytes()).ok_or(SchemeError::MalformedSecretKey)?;

    let mut sig = vec![0u8; SIGNATURE_MAX_LEN];
    signing_key.sign(
        rng,
        &DOMAIN_NONE,
        &HASH_ID_ORIGINAL_FALCON,
        message,
        &mut sig,
    );

    Ok(Signature::from_vec(sig))
}

/// Check `signature` over `message`.
///
/// A signature that does not match is `Ok(false)`. Only a public key that
/// cannot be decoded is an error.
pub fn verify(
    message: &[u8],
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<bool, SchemeError> {
    let verifying_key =
        VerifyingKey512::decode(public_key.as_bytes()).ok_or(SchemeError::MalformedPublicKey)?;

    Ok(verifying_key.verify(
        signature.as_bytes(),
        &DOMAIN_NONE,
        &HASH_ID_ORIGINAL_FALCON,
        message,
    ))
}
