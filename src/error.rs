//! use keykit::error::KeyKitError;

use thiserror::Error;

/// Represents errors that can occur in the KeyKit library.
///
/// Every failure is permanent for the given input; nothing here is worth retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyKitError {
    /// Unknown algorithm or curve name, or a malformed request parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The underlying primitive refused the requested parameters.
    #[error("Key generation error: {0}")]
    GenerationError(String),

    /// Error while serializing generated key material.
    #[error("Failed to encode key: {0}")]
    EncodingError(String),

    /// Error while reading previously encoded key material back.
    #[error("Failed to decode key: {0}")]
    DecodingError(String),
}

pub type Result<T> = std::result::Result<T, KeyKitError>;

impl From<rsa::Error> for KeyKitError {
    /// RSA errors only surface from key generation.
    fn from(err: rsa::Error) -> Self {
        KeyKitError::GenerationError(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for KeyKitError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        KeyKitError::EncodingError(err.to_string())
    }
}

impl From<pkcs8::spki::Error> for KeyKitError {
    fn from(err: pkcs8::spki::Error) -> Self {
        KeyKitError::EncodingError(err.to_string())
    }
}

impl From<ssh_key::Error> for KeyKitError {
    fn from(err: ssh_key::Error) -> Self {
        KeyKitError::EncodingError(err.to_string())
    }
}

impl From<pem::PemError> for KeyKitError {
    fn from(err: pem::PemError) -> Self {
        KeyKitError::DecodingError(err.to_string())
    }
}
