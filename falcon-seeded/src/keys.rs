//! Byte containers for Falcon-512 keys and signatures.
//!
//! Nothing here interprets the encodings; lengths are checked and the
//! bytes are handed to the scheme unchanged.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SchemeError;
use crate::scheme::{PUBLIC_KEY_LEN, SECRET_KEY_LEN, SIGNATURE_MAX_LEN};

/// Encoded Falcon-512 public key.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LEN],
}

impl PublicKey {
    pub(crate) fn from_array(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchemeError> {
        let bytes: [u8; PUBLIC_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| SchemeError::PublicKeyLength {
                expected: PUBLIC_KEY_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}..)", hex::encode(&self.bytes[..8]))
    }
}

/// Encoded Falcon-512 secret key. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; SECRET_KEY_LEN],
}

impl SecretKey {
    pub(crate) fn from_array(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Wrap an encoded secret key. Only the length is checked here; a
    /// corrupt encoding surfaces as [`SchemeError::MalformedSecretKey`]
    /// when signing.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchemeError> {
        if bytes.len() != SECRET_KEY_LEN {
            return Err(SchemeError::SecretKeyLength {
                expected: SECRET_KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut key = Self::from_array([0u8; SECRET_KEY_LEN]);
        key.bytes.copy_from_slice(bytes);
        Ok(key)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> zeroize::Zeroizing<Vec<u8>> {
        zeroize::Zeroizing::new(self.bytes.to_vec())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Falcon-512 signature bytes, at most [`SIGNATURE_MAX_LEN`] long.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchemeError> {
        if bytes.is_empty() || bytes.len() > SIGNATURE_MAX_LEN {
            return Err(SchemeError::SignatureLength {
                max: SIGNATURE_MAX_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    pub(crate) fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({} bytes)", self.bytes.len())
    }
}

/// A freshly generated public/secret key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub public: PublicKey,
    pub secret: SecretKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_lengths_are_rejected() {
        assert_eq!(
            PublicKey::from_bytes(&[0u8; 10]),
            Err(SchemeError::PublicKeyLength {
                expected: PUBLIC_KEY_LEN,
                actual: 10
            })
        );
        assert_eq!(
            SecretKey::from_bytes(&[0u8; PUBLIC_KEY_LEN]).unwrap_err(),
            SchemeError::SecretKeyLength {
                expected: SECRET_KEY_LEN,
                actual: PUBLIC_KEY_LEN
            }
        );
        assert!(Signature::from_bytes(&[]).is_err());
        assert!(Signature::from_bytes(&[0u8; SIGNATURE_MAX_LEN + 1]).is_err());
        assert!(Signature::from_bytes(&[0u8; SIGNATURE_MAX_LEN]).is_ok());
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let sk = SecretKey::from_bytes(&[0x5Au8; SECRET_KEY_LEN]).unwrap();
        let rendered = format!("{:?}", sk);
        assert!(!rendered.contains("5a"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_secret_key_zeroize() {
        let mut sk = SecretKey::from_bytes(&[0x11u8; SECRET_KEY_LEN]).unwrap();
        sk.zeroize();
        assert!(sk.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_public_key_hex() {
        let pk = PublicKey::from_bytes(&[0xABu8; PUBLIC_KEY_LEN]).unwrap();
        assert_eq!(pk.to_hex().len(), PUBLIC_KEY_LEN * 2);
        assert!(format!("{:?}", pk).starts_with("PublicKey(abababab"));
    }
}
