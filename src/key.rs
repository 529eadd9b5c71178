use std::fmt;

use const_oid::db::{rfc5912, rfc8410};
use der::Decode;
use ed25519_dalek::SigningKey as Ed25519SigningKey;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use pkcs8::EncodePublicKey;
use pkcs8::spki::SubjectPublicKeyInfoRef;
use rand_core::OsRng;
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey},
};
use tracing::debug;

use crate::error::{KeyKitError, Result};
use crate::pem_utils::{der_to_pem, pem_to_der};
use crate::request::{Algorithm, EcdsaCurve, KeyRequest};

pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
pub const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
pub const ED25519_PRIVATE_KEY_LABEL: &str = "ED25519 PRIVATE KEY";
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// A freshly generated (or re-imported) private key.
pub enum KeyPair {
    Rsa {
        private: Box<RsaPrivateKey>,
        public: RsaPublicKey,
    },
    Ecdsa(EcdsaKeyPair),
    Ed25519 {
        signing_key: Ed25519SigningKey,
    },
}

/// An ECDSA key; the variant is the curve.
pub enum EcdsaKeyPair {
    P224(p224::SecretKey),
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

/// Runs `$body` with `$key` bound to the curve-specific secret key.
macro_rules! with_secret_key {
    ($pair:expr, |$key:ident| $body:expr) => {
        match $pair {
            EcdsaKeyPair::P224($key) => $body,
            EcdsaKeyPair::P256($key) => $body,
            EcdsaKeyPair::P384($key) => $body,
            EcdsaKeyPair::P521($key) => $body,
        }
    };
}

impl EcdsaKeyPair {
    pub fn generate(curve: EcdsaCurve) -> Self {
        let mut rng = OsRng;
        match curve {
            EcdsaCurve::P224 => EcdsaKeyPair::P224(p224::SecretKey::random(&mut rng)),
            EcdsaCurve::P256 => EcdsaKeyPair::P256(p256::SecretKey::random(&mut rng)),
            EcdsaCurve::P384 => EcdsaKeyPair::P384(p384::SecretKey::random(&mut rng)),
            EcdsaCurve::P521 => EcdsaKeyPair::P521(p521::SecretKey::random(&mut rng)),
        }
    }

    pub fn curve(&self) -> EcdsaCurve {
        match self {
            EcdsaKeyPair::P224(_) => EcdsaCurve::P224,
            EcdsaKeyPair::P256(_) => EcdsaCurve::P256,
            EcdsaKeyPair::P384(_) => EcdsaCurve::P384,
            EcdsaKeyPair::P521(_) => EcdsaCurve::P521,
        }
    }

    /// SEC1 `ECPrivateKey`, including the named curve and public point.
    pub fn to_sec1_pem(&self) -> Result<String> {
        with_secret_key!(self, |key| key
            .to_sec1_der()
            .map(|der| der_to_pem(&der, EC_PRIVATE_KEY_LABEL)))
        .map_err(|e| KeyKitError::EncodingError(e.to_string()))
    }

    /// Reads a SEC1 `ECPrivateKey` on any supported curve.
    ///
    /// The curve OID embedded in the structure decides which curve accepts it.
    pub fn from_sec1_der(der: &[u8]) -> Result<Self> {
        if let Ok(key) = p224::SecretKey::from_sec1_der(der) {
            return Ok(EcdsaKeyPair::P224(key));
        }
        if let Ok(key) = p256::SecretKey::from_sec1_der(der) {
            return Ok(EcdsaKeyPair::P256(key));
        }
        if let Ok(key) = p384::SecretKey::from_sec1_der(der) {
            return Ok(EcdsaKeyPair::P384(key));
        }
        p521::SecretKey::from_sec1_der(der)
            .map(EcdsaKeyPair::P521)
            .map_err(|e| {
                KeyKitError::DecodingError(format!(
                    "EC private key is malformed or not on P224, P256, P384 or P521: {e}"
                ))
            })
    }

    pub fn public_key_der(&self) -> Result<Vec<u8>> {
        let doc = with_secret_key!(self, |key| key.public_key().to_public_key_der())?;
        Ok(doc.as_bytes().to_vec())
    }

    /// The public point in uncompressed SEC1 form (`0x04 || X || Y`).
    pub fn uncompressed_point(&self) -> Vec<u8> {
        with_secret_key!(self, |key| key
            .public_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec())
    }
}

impl KeyPair {
    /// Generate a key pair as described by `request`.
    ///
    /// Parameters that do not apply to the requested algorithm are ignored.
    pub fn generate(request: &KeyRequest) -> Result<Self> {
        match request.algorithm {
            Algorithm::Rsa => Self::generate_rsa(request.rsa_bits),
            Algorithm::Ecdsa => Ok(Self::generate_ecdsa(request.ecdsa_curve)),
            Algorithm::Ed25519 => Ok(Self::generate_ed25519()),
        }
    }

    /// Generate an RSA key pair with the specified number of bits.
    pub fn generate_rsa(bits: usize) -> Result<Self> {
        debug!(algorithm = %Algorithm::Rsa, bits, "generating key pair");
        let mut rng = OsRng;
        let private = RsaPrivateKey::new(&mut rng, bits)?;
        let public = RsaPublicKey::from(&private);
        Ok(KeyPair::Rsa {
            private: Box::new(private),
            public,
        })
    }

    /// Generate an ECDSA key pair on `curve`.
    pub fn generate_ecdsa(curve: EcdsaCurve) -> Self {
        debug!(algorithm = %Algorithm::Ecdsa, %curve, "generating key pair");
        KeyPair::Ecdsa(EcdsaKeyPair::generate(curve))
    }

    /// Generate an Ed25519 key pair.
    pub fn generate_ed25519() -> Self {
        debug!(algorithm = %Algorithm::Ed25519, "generating key pair");
        let mut rng = OsRng;
        let signing_key = Ed25519SigningKey::generate(&mut rng);
        KeyPair::Ed25519 { signing_key }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            KeyPair::Rsa { .. } => Algorithm::Rsa,
            KeyPair::Ecdsa(_) => Algorithm::Ecdsa,
            KeyPair::Ed25519 { .. } => Algorithm::Ed25519,
        }
    }

    /// The curve of an ECDSA key, `None` for other algorithms.
    pub fn ecdsa_curve(&self) -> Option<EcdsaCurve> {
        match self {
            KeyPair::Ecdsa(pair) => Some(pair.curve()),
            KeyPair::Rsa { .. } | KeyPair::Ed25519 { .. } => None,
        }
    }

    /// Encodes the private key as PEM.
    ///
    /// RSA keys use PKCS#1 and EC keys use SEC1. Ed25519 keys carry their
    /// 32-byte seed as the PEM body with no DER wrapping.
    pub fn private_key_pem(&self) -> Result<String> {
        match self {
            KeyPair::Rsa { private, .. } => {
                let der = private.to_pkcs1_der()?;
                Ok(der_to_pem(der.as_bytes(), RSA_PRIVATE_KEY_LABEL))
            }
            KeyPair::Ecdsa(pair) => pair.to_sec1_pem(),
            KeyPair::Ed25519 { signing_key } => Ok(der_to_pem(
                &signing_key.to_bytes(),
                ED25519_PRIVATE_KEY_LABEL,
            )),
        }
    }

    /// PKIX `SubjectPublicKeyInfo` DER of the public key.
    pub fn public_key_der(&self) -> Result<Vec<u8>> {
        match self {
            KeyPair::Rsa { public, .. } => Ok(public.to_public_key_der()?.as_bytes().to_vec()),
            KeyPair::Ecdsa(pair) => pair.public_key_der(),
            KeyPair::Ed25519 { signing_key } => Ok(signing_key
                .verifying_key()
                .to_public_key_der()?
                .as_bytes()
                .to_vec()),
        }
    }

    pub fn public_key_pem(&self) -> Result<String> {
        Ok(der_to_pem(&self.public_key_der()?, PUBLIC_KEY_LABEL))
    }

    /// Reads back a private key PEM in the format [`KeyPair::private_key_pem`] writes.
    pub fn from_private_key_pem(algorithm: Algorithm, pem: &str) -> Result<Self> {
        match algorithm {
            Algorithm::Rsa => {
                let der = pem_to_der(pem, RSA_PRIVATE_KEY_LABEL)?;
                let private = RsaPrivateKey::from_pkcs1_der(&der)
                    .map_err(|e| KeyKitError::DecodingError(e.to_string()))?;
                let public = RsaPublicKey::from(&private);
                Ok(KeyPair::Rsa {
                    private: Box::new(private),
                    public,
                })
            }
            Algorithm::Ecdsa => {
                let der = pem_to_der(pem, EC_PRIVATE_KEY_LABEL)?;
                Ok(KeyPair::Ecdsa(EcdsaKeyPair::from_sec1_der(&der)?))
            }
            Algorithm::Ed25519 => {
                let seed = pem_to_der(pem, ED25519_PRIVATE_KEY_LABEL)?;
                let seed: [u8; 32] = seed.as_slice().try_into().map_err(|_| {
                    KeyKitError::DecodingError(format!(
                        "Ed25519 seed must be 32 bytes, found {}",
                        seed.len()
                    ))
                })?;
                Ok(KeyPair::Ed25519 {
                    signing_key: Ed25519SigningKey::from_bytes(&seed),
                })
            }
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("KeyPair");
        s.field("algorithm", &self.algorithm());
        match self {
            KeyPair::Rsa { public, .. } => {
                use rsa::traits::PublicKeyParts;
                s.field("bits", &(public.size() * 8));
            }
            KeyPair::Ecdsa(pair) => {
                s.field("curve", &pair.curve());
            }
            KeyPair::Ed25519 { .. } => {}
        }
        s.finish_non_exhaustive()
    }
}

/// Algorithm identity of a PEM-encoded PKIX public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyInfo {
    pub algorithm: Algorithm,
    pub ecdsa_curve: Option<EcdsaCurve>,
}

impl PublicKeyInfo {
    /// Parses a `PUBLIC KEY` PEM and classifies it by its SPKI algorithm OIDs.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let der = pem_to_der(pem, PUBLIC_KEY_LABEL)?;
        let spki = SubjectPublicKeyInfoRef::from_der(&der)
            .map_err(|e| KeyKitError::DecodingError(e.to_string()))?;
        let oid = spki.algorithm.oid;

        if oid == rfc5912::RSA_ENCRYPTION {
            Ok(Self {
                algorithm: Algorithm::Rsa,
                ecdsa_curve: None,
            })
        } else if oid == rfc5912::ID_EC_PUBLIC_KEY {
            let curve_oid = spki
                .algorithm
                .parameters_oid()
                .map_err(|e| KeyKitError::DecodingError(e.to_string()))?;
            let curve = EcdsaCurve::from_oid(&curve_oid).ok_or_else(|| {
                KeyKitError::DecodingError(format!("unsupported EC curve {curve_oid}"))
            })?;
            Ok(Self {
                algorithm: Algorithm::Ecdsa,
                ecdsa_curve: Some(curve),
            })
        } else if oid == rfc8410::ID_ED_25519 {
            Ok(Self {
                algorithm: Algorithm::Ed25519,
                ecdsa_curve: None,
            })
        } else {
            Err(KeyKitError::DecodingError(format!(
                "unsupported public key algorithm {oid}"
            )))
        }
    }
}
