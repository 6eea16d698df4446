//! Seeded SHAKE256 deterministic random bit generator.
//!
//! The generator is meant as the reproducible entropy source behind
//! seeded key generation and signing: the same seed and personalization
//! always yield the same byte stream, regardless of how that stream is
//! split into requests.
//!
//! Stream generation, per 64-byte block `i`:
//!
//! ```text
//! custom  = personalization || counter_LE(u128)
//! block_i = XOF(k, "DRBG/stream", custom)
//! ```
//!
//! After every `ratchet_every_blocks` blocks the key is replaced with
//! `derive_key(k, "DRBG/ratchet", custom)`, so a later compromise of the
//! state does not reveal earlier output.

use core::cmp::min;
use core::fmt;

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::entropy::FillBytes;
use crate::xof::{derive_key, xof_fill};

/// Output block size in bytes.
pub const BLOCK_LEN: usize = 64;

/// Blocks generated between automatic key ratchets (4 MiB of output).
pub const DEFAULT_RATCHET_INTERVAL: u64 = 1 << 16;

pub struct ShakeDrbg {
    key: Zeroizing<[u8; 32]>,
    counter: u128,
    personalization: Zeroizing<Vec<u8>>,
    blocks_since_ratchet: u64,
    ratchet_every_blocks: u64,
    // Unread tail of the last generated block.
    pending: Zeroizing<[u8; BLOCK_LEN]>,
    pending_pos: usize,
}

impl ShakeDrbg {
    /// Instantiate from secret seed material and a personalization string
    /// (application label, epoch, transcript hash, ...).
    pub fn new(seed_material: &[u8], personalization: &[u8]) -> Self {
        let key = derive_key(seed_material, b"DRBG/seed", personalization);
        Self::from_key(key, personalization)
    }

    /// Instantiate from an already derived 32-byte key.
    pub fn from_key(key: [u8; 32], personalization: &[u8]) -> Self {
        Self {
            key: Zeroizing::new(key),
            counter: 0,
            personalization: Zeroizing::new(personalization.to_vec()),
            blocks_since_ratchet: 0,
            ratchet_every_blocks: DEFAULT_RATCHET_INTERVAL,
            pending: Zeroizing::new([0u8; BLOCK_LEN]),
            pending_pos: BLOCK_LEN,
        }
    }

    /// Mix `additional` input into the key. Resets the counter, the
    /// ratchet schedule and any buffered output.
    pub fn reseed(&mut self, additional: &[u8]) {
        self.key = Zeroizing::new(derive_key(self.key.as_ref(), b"DRBG/reseed", additional));
        self.counter = 0;
        self.blocks_since_ratchet = 0;
        self.discard_pending();
    }

    /// Ratchet the key every `every_blocks` blocks (minimum 1).
    pub fn set_ratchet_interval(&mut self, every_blocks: u64) {
        self.ratchet_every_blocks = every_blocks.max(1);
    }

    /// Replace the key with a one-way derivation of itself. The block
    /// counter keeps running; buffered output is discarded.
    pub fn ratchet(&mut self) {
        let custom = self.block_context();
        self.key = Zeroizing::new(derive_key(self.key.as_ref(), b"DRBG/ratchet", &custom));
        self.blocks_since_ratchet = 0;
        self.discard_pending();
    }

    /// Number of blocks generated so far.
    pub fn blocks_generated(&self) -> u128 {
        self.counter
    }

    fn block_context(&self) -> Zeroizing<Vec<u8>> {
        let mut custom = Zeroizing::new(Vec::with_capacity(self.personalization.len() + 16));
        custom.extend_from_slice(&self.personalization);
        custom.extend_from_slice(&self.counter.to_le_bytes());
        custom
    }

    fn discard_pending(&mut self) {
        self.pending_pos = BLOCK_LEN;
    }

    fn next_block(&mut self) {
        let custom = self.block_context();
        xof_fill(self.key.as_ref(), b"DRBG/stream", &custom, &mut self.pending[..]);
        self.pending_pos = 0;

        self.counter = self.counter.wrapping_add(1);
        self.blocks_since_ratchet = self.blocks_since_ratchet.saturating_add(1);
        if self.blocks_since_ratchet >= self.ratchet_every_blocks {
            let custom = self.block_context();
            self.key = Zeroizing::new(derive_key(self.key.as_ref(), b"DRBG/ratchet", &custom));
            self.blocks_since_ratchet = 0;
        }
    }
}

impl RngCore for ShakeDrbg {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut off = 0;
        while off < dest.len() {
            if self.pending_pos == BLOCK_LEN {
                self.next_block();
            }
            let n = min(BLOCK_LEN - self.pending_pos, dest.len() - off);
            dest[off..off + n].copy_from_slice(&self.pending[self.pending_pos..self.pending_pos + n]);
            self.pending_pos += n;
            off += n;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ShakeDrbg {}

impl FillBytes for ShakeDrbg {
    fn fill(&mut self, out: &mut [u8]) {
        self.fill_bytes(out)
    }
}

impl fmt::Debug for ShakeDrbg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShakeDrbg")
            .field("counter", &self.counter)
            .field("ratchet_every_blocks", &self.ratchet_every_blocks)
            .finish_non_exhaustive()
    }
}
