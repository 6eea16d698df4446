use thiserror::Error;

/// Failure reported by the Falcon-512 routines.
///
/// The reasons are passed through as-is; nothing in this crate retries an
/// operation or reinterprets why it failed. Running out of entropy is not
/// an error: an empty [`EntropySlot`](crate::EntropySlot) serves zero bytes
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemeError {
    #[error("secret key must be {expected} bytes, got {actual}")]
    SecretKeyLength { expected: usize, actual: usize },

    #[error("public key must be {expected} bytes, got {actual}")]
    PublicKeyLength { expected: usize, actual: usize },

    #[error("signature must be between 1 and {max} bytes, got {actual}")]
    SignatureLength { max: usize, actual: usize },

    #[error("secret key encoding is malformed")]
    MalformedSecretKey,

    #[error("public key encoding is malformed")]
    MalformedPublicKey,
}

impl SchemeError {
    /// Non-zero status code for hosts that relay the C-style
    /// `0 = success` convention of Falcon implementations.
    pub fn status(&self) -> i32 {
        match self {
            SchemeError::SecretKeyLength { .. } => -1,
            SchemeError::PublicKeyLength { .. } => -2,
            SchemeError::SignatureLength { .. } => -3,
            SchemeError::MalformedSecretKey => -4,
            SchemeError::MalformedPublicKey => -5,
        }
    }
}
