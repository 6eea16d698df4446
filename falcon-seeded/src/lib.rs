//! Falcon-512 with caller-injected entropy.
//!
//! [Falcon] consumes randomness internally: key generation samples the
//! secret NTRU basis, and signing draws a salt and seeds its Gaussian
//! sampler. This crate makes that randomness an explicit, per-call input.
//! The caller hands over a [`FillBytes`] source. It is installed into a
//! fresh [`EntropySlot`] immediately before the operation runs, and the
//! operation reads every random byte through that slot. Verification
//! consumes no randomness and never touches a slot.
//!
//! This is what reproducible test vectors, deterministic simulations and
//! host-driven DRBGs need: the same byte stream always yields the same key
//! pair or signature, and two threads signing concurrently can never see
//! each other's source.
//!
//! An operation run against an *empty* slot does not fall back to OS
//! randomness. It receives zero bytes, producing a deterministic (and
//! insecure) result that is identical to installing [`ZeroSource`].
//!
//! The lattice mathematics is provided by the [fn-dsa] crate and is not
//! reimplemented here.
//!
//! [Falcon]: https://falcon-sign.info/
//! [fn-dsa]: https://crates.io/crates/fn-dsa
//!
//! # Usage
//!
//! ```
//! use falcon_seeded::{generate_keypair, sign, verify};
//! use falcon_seeded::drbg::ShakeDrbg;
//!
//! // Any FillBytes works: a DRBG, a closure via `from_fn`, or a rand_core
//! // generator wrapped in `RngSource`.
//! let pair = generate_keypair(ShakeDrbg::new(&[0x42; 32], b"keygen")).unwrap();
//!
//! let msg = b"Hello, world!";
//! let sig = sign(msg, &pair.secret, ShakeDrbg::new(&[0x07; 32], b"sign")).unwrap();
//! assert!(verify(msg, &sig, &pair.public).unwrap());
//! assert!(!verify(b"Hello, world?", &sig, &pair.public).unwrap());
//! ```
//!
//! For fully derandomized operation from stored seed material, see the
//! [`deterministic`] module.

pub mod deterministic;
pub mod drbg;
pub mod entropy;
mod error;
mod keys;
pub mod scheme;
pub mod seeded;
pub mod xof;

pub use entropy::{from_fn, EntropySlot, FillBytes, FromFn, RngSource, ZeroSource};
pub use error::SchemeError;
pub use keys::{KeyPair, PublicKey, SecretKey, Signature};
pub use scheme::{PUBLIC_KEY_LEN, SECRET_KEY_LEN, SIGNATURE_MAX_LEN};
pub use seeded::{generate_keypair, generate_keypair_in, sign, sign_in, verify, verify_bytes};
