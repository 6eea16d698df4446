//! Entropy sources and the slot that serves them to the signature routines.
//!
//! Falcon consumes randomness in two places: key generation and the
//! Gaussian sampling done while signing. Both routines pull their bytes
//! from an [`EntropySlot`], which is handed to them as an explicit
//! `rand_core` generator for the duration of one call. The slot holds at
//! most one [`FillBytes`] source at a time and is owned by whoever runs
//! the operation, so two threads (or two tasks) can never observe each
//! other's source.
//!
//! An empty slot does not reach for operating-system randomness. It fills
//! every request with zeros, which makes an accidental "unseeded" call
//! produce a deterministic and obviously reproducible key or signature
//! rather than silently depending on a hidden RNG.

use core::fmt;

use rand_core::{CryptoRng, RngCore};
use tracing::{trace, warn};

/// A source of entropy bytes.
///
/// Implementors must overwrite every byte of `out`. The slice length is the
/// number of bytes requested, and the buffer is only valid for the
/// duration of the call.
pub trait FillBytes {
    /// Overwrite `out` with entropy.
    fn fill(&mut self, out: &mut [u8]);
}

impl<T: FillBytes + ?Sized> FillBytes for &mut T {
    fn fill(&mut self, out: &mut [u8]) {
        (**self).fill(out)
    }
}

impl<T: FillBytes + ?Sized> FillBytes for Box<T> {
    fn fill(&mut self, out: &mut [u8]) {
        (**self).fill(out)
    }
}

/// Source backed by a closure, see [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

/// Turn a closure into a [`FillBytes`] source.
///
/// ```
/// use falcon_seeded::entropy::{from_fn, FillBytes};
///
/// let mut counter = 0u8;
/// let mut source = from_fn(move |out: &mut [u8]| {
///     for byte in out.iter_mut() {
///         counter = counter.wrapping_add(1);
///         *byte = counter;
///     }
/// });
/// let mut buf = [0u8; 3];
/// source.fill(&mut buf);
/// assert_eq!(buf, [1, 2, 3]);
/// ```
pub fn from_fn<F: FnMut(&mut [u8])>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F: FnMut(&mut [u8])> FillBytes for FromFn<F> {
    fn fill(&mut self, out: &mut [u8]) {
        (self.0)(out)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn")
    }
}

/// Adapter that lets any `rand_core` generator act as a [`FillBytes`]
/// source, e.g. a seeded `ChaCha20Rng`.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: RngCore> RngSource<R> {
    /// Wrap `rng`.
    pub fn new(rng: R) -> Self {
        Self(rng)
    }

    /// Recover the generator, e.g. to continue its stream elsewhere.
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: RngCore> FillBytes for RngSource<R> {
    fn fill(&mut self, out: &mut [u8]) {
        self.0.fill_bytes(out)
    }
}

/// A source that always writes zeros.
///
/// Installing it is observably identical to leaving the slot empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroSource;

impl FillBytes for ZeroSource {
    fn fill(&mut self, out: &mut [u8]) {
        out.fill(0);
    }
}

/// Per-operation holder of the active entropy source.
///
/// The slot is either empty or holds one borrowed source; [`set`] replaces
/// whatever was there before. It implements [`RngCore`] and [`CryptoRng`]
/// so it can be passed directly to the Falcon routines, which call back
/// into [`fill`] whenever they need bytes.
///
/// [`set`]: EntropySlot::set
/// [`fill`]: EntropySlot::fill
pub struct EntropySlot<'s> {
    source: Option<&'s mut (dyn FillBytes + 's)>,
    bytes_served: u64,
    fills_served: u64,
    warned_empty: bool,
}

impl<'s> EntropySlot<'s> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            source: None,
            bytes_served: 0,
            fills_served: 0,
            warned_empty: false,
        }
    }

    /// Create a slot with `source` already installed.
    pub fn with_source(source: &'s mut (dyn FillBytes + 's)) -> Self {
        let mut slot = Self::new();
        slot.set(source);
        slot
    }

    /// Install `source`, replacing any previously installed one.
    pub fn set(&mut self, source: &'s mut (dyn FillBytes + 's)) {
        self.source = Some(source);
    }

    /// Drop the installed source, if any. Later requests are zero-filled.
    pub fn clear(&mut self) {
        self.source = None;
    }

    /// Whether a source is installed. `false` means requests are zero-filled.
    pub fn is_installed(&self) -> bool {
        self.source.is_some()
    }

    /// Total number of bytes handed out since the slot was created.
    pub fn bytes_served(&self) -> u64 {
        self.bytes_served
    }

    /// Number of entropy requests served since the slot was created.
    pub fn fills_served(&self) -> u64 {
        self.fills_served
    }

    /// Fill `out` from the installed source, or with zeros if the slot is
    /// empty.
    pub fn fill(&mut self, out: &mut [u8]) {
        trace!(len = out.len(), installed = self.source.is_some(), "entropy request");
        match self.source.as_mut() {
            Some(source) => source.fill(out),
            None => {
                if !self.warned_empty {
                    warn!("no entropy source installed, serving zero bytes");
                    self.warned_empty = true;
                }
                out.fill(0);
            }
        }
        self.bytes_served = self.bytes_served.saturating_add(out.len() as u64);
        self.fills_served = self.fills_served.saturating_add(1);
    }
}

impl Default for EntropySlot<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntropySlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntropySlot")
            .field("installed", &self.is_installed())
            .field("bytes_served", &self.bytes_served)
            .field("fills_served", &self.fills_served)
            .finish()
    }
}

impl RngCore for EntropySlot<'_> {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill(dest);
        Ok(())
    }
}

// The slot carries whatever the caller installed; vetting the source is the
// caller's job, and an empty slot is deliberately degenerate.
impl CryptoRng for EntropySlot<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u8);

    impl FillBytes for Counter {
        fn fill(&mut self, out: &mut [u8]) {
            for byte in out.iter_mut() {
                self.0 = self.0.wrapping_add(1);
                *byte = self.0;
            }
        }
    }

    #[test]
    fn test_empty_slot_serves_zeros() {
        let mut slot = EntropySlot::new();
        assert!(!slot.is_installed());

        let mut buf = [0xAAu8; 64];
        slot.fill(&mut buf);
        assert_eq!(buf, [0u8; 64]);
        assert_eq!(slot.bytes_served(), 64);
    }

    #[test]
    fn test_installed_source_output_is_copied_verbatim() {
        let mut counter = Counter(0);
        let mut slot = EntropySlot::with_source(&mut counter);

        let mut buf = [0u8; 4];
        slot.fill(&mut buf);
        assert_eq!(buf, [1, 2, 3, 4]);

        slot.fill(&mut buf);
        assert_eq!(buf, [5, 6, 7, 8]);
        assert_eq!(slot.fills_served(), 2);
    }

    #[test]
    fn test_set_overwrites_previous_source() {
        let mut first = Counter(0);
        let mut second = Counter(100);
        let mut slot = EntropySlot::new();

        slot.set(&mut first);
        slot.set(&mut second);

        let mut buf = [0u8; 2];
        slot.fill(&mut buf);
        assert_eq!(buf, [101, 102]);
        drop(slot);

        // The overwritten source was never consulted.
        assert_eq!(first.0, 0);
    }

    #[test]
    fn test_clear_returns_to_zero_fill() {
        let mut counter = Counter(0);
        let mut slot = EntropySlot::with_source(&mut counter);
        slot.clear();
        assert!(!slot.is_installed());

        let mut buf = [0xFFu8; 8];
        slot.fill(&mut buf);
        assert_eq!(buf, [0u8; 8]);
    }

    #[test]
    fn test_zero_source_matches_empty_slot() {
        let mut zero = ZeroSource;
        let mut installed = EntropySlot::with_source(&mut zero);
        let mut empty = EntropySlot::new();

        assert_eq!(installed.next_u64(), empty.next_u64());
        assert_eq!(installed.next_u32(), 0);
    }

    #[test]
    fn test_rng_core_reads_little_endian() {
        let mut counter = Counter(0);
        let mut slot = EntropySlot::with_source(&mut counter);
        assert_eq!(slot.next_u32(), u32::from_le_bytes([1, 2, 3, 4]));
    }

    #[test]
    fn test_from_fn_and_boxed_sources() {
        let mut calls = Vec::new();
        {
            let mut source = from_fn(|out: &mut [u8]| {
                calls.push(out.len());
                out.fill(7);
            });
            let mut slot = EntropySlot::with_source(&mut source);
            let mut buf = [0u8; 5];
            slot.fill(&mut buf);
            assert_eq!(buf, [7u8; 5]);
        }
        assert_eq!(calls, [5]);

        let mut boxed: Box<dyn FillBytes> = Box::new(Counter(9));
        let mut buf = [0u8; 1];
        boxed.fill(&mut buf);
        assert_eq!(buf, [10]);
    }
}
