use std::fmt;
use std::str::FromStr;

use bon::Builder;

use crate::error::{KeyKitError, Result};

/// Modulus size used for RSA keys when the request does not name one.
pub const DEFAULT_RSA_BITS: usize = 2048;

/// Key algorithms that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Rsa,
    Ecdsa,
    Ed25519,
}

impl Algorithm {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Rsa => "RSA",
            Algorithm::Ecdsa => "ECDSA",
            Algorithm::Ed25519 => "ED25519",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = KeyKitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RSA" => Ok(Algorithm::Rsa),
            "ECDSA" => Ok(Algorithm::Ecdsa),
            "ED25519" => Ok(Algorithm::Ed25519),
            other => Err(KeyKitError::InvalidParameter(format!(
                "invalid key algorithm {other:?}"
            ))),
        }
    }
}

/// Named NIST curves supported for ECDSA keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EcdsaCurve {
    #[default]
    P224,
    P256,
    P384,
    P521,
}

impl EcdsaCurve {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EcdsaCurve::P224 => "P224",
            EcdsaCurve::P256 => "P256",
            EcdsaCurve::P384 => "P384",
            EcdsaCurve::P521 => "P521",
        }
    }

    /// Size of the curve's field in bits.
    pub const fn bits(&self) -> usize {
        match self {
            EcdsaCurve::P224 => 224,
            EcdsaCurve::P256 => 256,
            EcdsaCurve::P384 => 384,
            EcdsaCurve::P521 => 521,
        }
    }

    /// The named-curve OID carried in SEC1 and SPKI parameters.
    pub const fn oid(&self) -> const_oid::ObjectIdentifier {
        use const_oid::db::rfc5912;
        match self {
            EcdsaCurve::P224 => rfc5912::SECP_224_R_1,
            EcdsaCurve::P256 => rfc5912::SECP_256_R_1,
            EcdsaCurve::P384 => rfc5912::SECP_384_R_1,
            EcdsaCurve::P521 => rfc5912::SECP_521_R_1,
        }
    }

    pub fn from_oid(oid: &const_oid::ObjectIdentifier) -> Option<Self> {
        [
            EcdsaCurve::P224,
            EcdsaCurve::P256,
            EcdsaCurve::P384,
            EcdsaCurve::P521,
        ]
        .into_iter()
        .find(|curve| curve.oid() == *oid)
    }
}

impl fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EcdsaCurve {
    type Err = KeyKitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "P224" => Ok(EcdsaCurve::P224),
            "P256" => Ok(EcdsaCurve::P256),
            "P384" => Ok(EcdsaCurve::P384),
            "P521" => Ok(EcdsaCurve::P521),
            _ => Err(KeyKitError::InvalidParameter(
                "invalid ecdsa_curve; must be P224, P256, P384 or P521".to_string(),
            )),
        }
    }
}

/// Parameters for generating a key pair.
///
/// # Fields
/// * `algorithm` - The key algorithm.
/// * `rsa_bits` - Modulus size for RSA keys; ignored otherwise.
/// * `ecdsa_curve` - Curve for ECDSA keys; ignored otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct KeyRequest {
    pub algorithm: Algorithm,
    #[builder(default = DEFAULT_RSA_BITS)]
    pub rsa_bits: usize,
    #[builder(default)]
    pub ecdsa_curve: EcdsaCurve,
}

impl KeyRequest {
    /// A request for `algorithm` with every other parameter at its default.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            rsa_bits: DEFAULT_RSA_BITS,
            ecdsa_curve: EcdsaCurve::default(),
        }
    }

    /// Builds a request from named string parameters as supplied by a host.
    ///
    /// Recognized names are `algorithm` (required), `rsa_bits` and `ecdsa_curve`.
    /// Any other name is rejected.
    pub fn from_params<'a, I>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut algorithm = None;
        let mut rsa_bits = DEFAULT_RSA_BITS;
        let mut ecdsa_curve = EcdsaCurve::default();

        for (name, value) in params {
            match name {
                "algorithm" => algorithm = Some(value.parse::<Algorithm>()?),
                "rsa_bits" => {
                    rsa_bits = value.trim().parse().map_err(|_| {
                        KeyKitError::InvalidParameter(format!("invalid rsa_bits {value:?}"))
                    })?
                }
                "ecdsa_curve" => ecdsa_curve = value.parse()?,
                other => {
                    return Err(KeyKitError::InvalidParameter(format!(
                        "unknown parameter {other:?}"
                    )));
                }
            }
        }

        let algorithm = algorithm.ok_or_else(|| {
            KeyKitError::InvalidParameter("missing required parameter \"algorithm\"".to_string())
        })?;

        Ok(Self {
            algorithm,
            rsa_bits,
            ecdsa_curve,
        })
    }
}
