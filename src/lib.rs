//! # KeyKit - Pure Rust Private Key Generation
//!
//! KeyKit generates fresh RSA, ECDSA, and Ed25519 key pairs with rustcrypto libraries
//! and encodes each one into the four strings a host typically stores for a
//! generated key: a private key PEM, a PKIX public key PEM, an OpenSSH
//! `authorized_keys` line, and the MD5 fingerprint of that line's key blob.
//!
//! ## Supported Key Types
//!
//! - **RSA**: any modulus size the `rsa` crate accepts (2048 bits by default)
//! - **ECDSA**: P-224, P-256, P-384, and P-521 curves (P-224 by default)
//! - **Ed25519**: Edwards curve digital signature algorithm
//!
//! | Algorithm     | Private PEM label     | OpenSSH type          |
//! |---------------|-----------------------|-----------------------|
//! | RSA           | `RSA PRIVATE KEY`     | `ssh-rsa`             |
//! | ECDSA P-224   | `EC PRIVATE KEY`      | none                  |
//! | ECDSA P-256+  | `EC PRIVATE KEY`      | `ecdsa-sha2-nistpNNN` |
//! | Ed25519       | `ED25519 PRIVATE KEY` | `ssh-ed25519`         |
//!
//! Public keys always use the `PUBLIC KEY` label.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keykit::{Algorithm, EcdsaCurve, KeyRequest};
//!
//! # fn main() -> Result<(), keykit::error::KeyKitError> {
//! let request = KeyRequest::builder()
//!     .algorithm(Algorithm::Ecdsa)
//!     .ecdsa_curve(EcdsaCurve::P256)
//!     .build();
//!
//! let material = keykit::generate(&request)?;
//! println!("{}", material.private_key_pem);
//! println!("{}", material.authorized_key());
//! println!("{}", material.fingerprint_md5());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use keykit::{KeyRequest, error::KeyKitError};
//!
//! match KeyRequest::from_params([("algorithm", "ECDSA"), ("ecdsa_curve", "P999")]) {
//!     Ok(request) => println!("Request accepted: {:?}", request),
//!     Err(KeyKitError::InvalidParameter(msg)) => println!("Invalid parameter: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`request`]: Algorithm and curve selection
//! - [`key`]: Key generation, PEM encoding, and re-import
//! - [`ssh`]: OpenSSH public keys and MD5 fingerprints
//! - [`material`]: The four encoded outputs
//! - [`error`]: Error types

pub mod error;
pub mod key;
pub mod material;
pub mod pem_utils;
pub mod request;
pub mod ssh;

pub use key::{KeyPair, PublicKeyInfo};
pub use material::EncodedKeyMaterial;
pub use request::{Algorithm, DEFAULT_RSA_BITS, EcdsaCurve, KeyRequest};
pub use ssh::OpenSshPublicKey;

/// Generates a brand-new key pair for `request` and encodes it.
///
/// Either all outputs are produced or an error is returned.
pub fn generate(request: &KeyRequest) -> error::Result<EncodedKeyMaterial> {
    let pair = KeyPair::generate(request)?;
    EncodedKeyMaterial::encode(&pair)
}
