use crate::error::Result;
use crate::key::KeyPair;
use crate::ssh::OpenSshPublicKey;

pub const PRIVATE_KEY_PEM: &str = "private_key_pem";
pub const PUBLIC_KEY_PEM: &str = "public_key_pem";
pub const PUBLIC_KEY_OPENSSH: &str = "public_key_openssh";
pub const PUBLIC_KEY_FINGERPRINT_MD5: &str = "public_key_fingerprint_md5";

/// Everything derived from one generated key pair.
///
/// Built in one step by [`EncodedKeyMaterial::encode`]; there is no way to end
/// up with only some of the fields set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedKeyMaterial {
    pub private_key_pem: String,
    pub public_key_pem: String,
    /// `None` when the key type has no OpenSSH encoding (ECDSA P224).
    pub public_key_openssh: Option<OpenSshPublicKey>,
}

impl EncodedKeyMaterial {
    pub fn encode(pair: &KeyPair) -> Result<Self> {
        Ok(Self {
            private_key_pem: pair.private_key_pem()?,
            public_key_pem: pair.public_key_pem()?,
            public_key_openssh: pair.openssh_public_key()?,
        })
    }

    /// The `authorized_keys` line, or `""` when there is none.
    pub fn authorized_key(&self) -> &str {
        self.public_key_openssh
            .as_ref()
            .map_or("", |ssh| ssh.authorized_key.as_str())
    }

    /// The MD5 fingerprint, or `""` when there is no OpenSSH key.
    pub fn fingerprint_md5(&self) -> &str {
        self.public_key_openssh
            .as_ref()
            .map_or("", |ssh| ssh.fingerprint_md5.as_str())
    }

    /// The four output strings keyed by attribute name, in a stable order.
    pub fn to_attributes(&self) -> [(&'static str, String); 4] {
        [
            (PRIVATE_KEY_PEM, self.private_key_pem.clone()),
            (PUBLIC_KEY_PEM, self.public_key_pem.clone()),
            (PUBLIC_KEY_OPENSSH, self.authorized_key().to_string()),
            (
                PUBLIC_KEY_FINGERPRINT_MD5,
                self.fingerprint_md5().to_string(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::EcdsaCurve;

    #[test]
    fn p224_attributes_are_co_empty() {
        let pair = KeyPair::generate_ecdsa(EcdsaCurve::P224);
        let material = EncodedKeyMaterial::encode(&pair).unwrap();
        let attributes = material.to_attributes();
        assert_eq!(attributes[2], (PUBLIC_KEY_OPENSSH, String::new()));
        assert_eq!(attributes[3], (PUBLIC_KEY_FINGERPRINT_MD5, String::new()));
        assert!(!attributes[0].1.is_empty());
        assert!(!attributes[1].1.is_empty());
    }

    #[test]
    fn attributes_mirror_the_fields() {
        let pair = KeyPair::generate_ed25519();
        let material = EncodedKeyMaterial::encode(&pair).unwrap();
        let ssh = material.public_key_openssh.clone().unwrap();
        let names: Vec<_> = material.to_attributes().map(|(name, _)| name).to_vec();
        assert_eq!(
            names,
            [
                "private_key_pem",
                "public_key_pem",
                "public_key_openssh",
                "public_key_fingerprint_md5"
            ]
        );
        assert_eq!(material.authorized_key(), ssh.authorized_key);
        assert_eq!(material.fingerprint_md5(), ssh.fingerprint_md5);
    }
}
