//! Keyed SHAKE256 derivations with length-prefixed domain separation.
//!
//! Every input is framed as `tag || len(key) || key || len(label) || label
//! || len(context) || context` (lengths as little-endian `u64`), so no two
//! distinct `(key, label, context)` triples absorb the same byte string.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

const TAG_DERIVE: &[u8] = b"FALCON-SEEDED/DERIVE/v1";
const TAG_XOF: &[u8] = b"FALCON-SEEDED/XOF/v1";

fn framed(tag: &[u8], key: &[u8], label: &[u8], context: &[u8]) -> Shake256 {
    let mut hasher = Shake256::default();
    hasher.update(tag);
    for part in [key, label, context] {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    hasher
}

/// Derive a 32-byte key from `key`, bound to `label` and `context`.
pub fn derive_key(key: &[u8], label: &[u8], context: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    framed(TAG_DERIVE, key, label, context)
        .finalize_xof()
        .read(&mut out);
    out
}

/// Fill `out` with the keyed output stream for `(key, label, context)`.
pub fn xof_fill(key: &[u8], label: &[u8], context: &[u8], out: &mut [u8]) {
    framed(TAG_XOF, key, label, context)
        .finalize_xof()
        .read(out);
}
