//! OpenSSH public keys and their MD5 fingerprints.
//!
//! The SSH wire blob is built with [`ssh_key`]; the `authorized_keys` line and the
//! fingerprint are both derived from that one blob, so they always describe the
//! same key.

use base64::{Engine, engine::general_purpose::STANDARD};
use md5::{Digest, Md5};
use ssh_key::public::{EcdsaPublicKey, Ed25519PublicKey, KeyData, RsaPublicKey};
use tracing::debug;

use crate::error::Result;
use crate::key::{EcdsaKeyPair, KeyPair};

/// An `authorized_keys`-style public key line and its legacy fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSshPublicKey {
    /// `"<type> <base64 blob>"`, without comment or trailing newline.
    ///
    /// Go's `ssh.MarshalAuthorizedKey` ends the same line with `"\n"`; trim
    /// that before comparing against its output.
    pub authorized_key: String,
    /// MD5 of the blob as colon-separated lowercase hex pairs.
    pub fingerprint_md5: String,
}

impl OpenSshPublicKey {
    pub fn from_key_data(key_data: KeyData) -> Result<Self> {
        let algorithm = key_data.algorithm();
        let blob = ssh_key::PublicKey::from(key_data).to_bytes()?;
        let fingerprint_md5 = md5_fingerprint(&blob);
        debug!(%algorithm, fingerprint = %fingerprint_md5, "encoded OpenSSH public key");
        Ok(Self {
            authorized_key: format!("{} {}", algorithm.as_str(), STANDARD.encode(&blob)),
            fingerprint_md5,
        })
    }
}

/// `aa:bb:...` rendering of the MD5 digest of `blob`.
pub fn md5_fingerprint(blob: &[u8]) -> String {
    Md5::digest(blob)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

impl KeyPair {
    /// The OpenSSH form of the public key.
    ///
    /// Returns `Ok(None)` for ECDSA keys on P224, which has no SSH key type.
    pub fn openssh_public_key(&self) -> Result<Option<OpenSshPublicKey>> {
        let key_data = match self {
            KeyPair::Rsa { public, .. } => KeyData::Rsa(RsaPublicKey::try_from(public)?),
            KeyPair::Ecdsa(EcdsaKeyPair::P224(_)) => {
                debug!("P224 keys have no OpenSSH encoding");
                return Ok(None);
            }
            KeyPair::Ecdsa(pair) => {
                KeyData::Ecdsa(EcdsaPublicKey::from_sec1_bytes(&pair.uncompressed_point())?)
            }
            KeyPair::Ed25519 { signing_key } => {
                KeyData::Ed25519(Ed25519PublicKey(signing_key.verifying_key().to_bytes()))
            }
        };
        OpenSshPublicKey::from_key_data(key_data).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::EcdsaCurve;

    #[test]
    fn fingerprint_of_empty_input() {
        assert_eq!(
            md5_fingerprint(b""),
            "d4:1d:8c:d9:8f:00:b2:04:e9:80:09:98:ec:f8:42:7e"
        );
    }

    #[test]
    fn ed25519_blob_layout() {
        let pair = KeyPair::generate_ed25519();
        let ssh = pair.openssh_public_key().unwrap().unwrap();
        let (key_type, encoded) = ssh.authorized_key.split_once(' ').unwrap();
        assert_eq!(key_type, "ssh-ed25519");
        assert!(!ssh.authorized_key.ends_with('\n'));

        let blob = STANDARD.decode(encoded).unwrap();
        let KeyPair::Ed25519 { signing_key } = &pair else {
            panic!("expected an Ed25519 key");
        };
        let mut expected = Vec::new();
        expected.extend_from_slice(&11u32.to_be_bytes());
        expected.extend_from_slice(b"ssh-ed25519");
        expected.extend_from_slice(&32u32.to_be_bytes());
        expected.extend_from_slice(&signing_key.verifying_key().to_bytes());
        assert_eq!(blob, expected);
        assert_eq!(ssh.fingerprint_md5, md5_fingerprint(&expected));
    }

    #[test]
    fn ecdsa_blob_carries_curve_and_point() {
        for (curve, key_type, curve_id) in [
            (EcdsaCurve::P256, "ecdsa-sha2-nistp256", "nistp256"),
            (EcdsaCurve::P384, "ecdsa-sha2-nistp384", "nistp384"),
            (EcdsaCurve::P521, "ecdsa-sha2-nistp521", "nistp521"),
        ] {
            let pair = KeyPair::generate_ecdsa(curve);
            let ssh = pair.openssh_public_key().unwrap().unwrap();
            let (line_type, encoded) = ssh.authorized_key.split_once(' ').unwrap();
            assert_eq!(line_type, key_type);

            let KeyPair::Ecdsa(ec) = &pair else {
                panic!("expected an ECDSA key");
            };
            let point = ec.uncompressed_point();
            let mut expected = Vec::new();
            for field in [key_type.as_bytes(), curve_id.as_bytes(), point.as_slice()] {
                expected.extend_from_slice(&(field.len() as u32).to_be_bytes());
                expected.extend_from_slice(field);
            }
            assert_eq!(STANDARD.decode(encoded).unwrap(), expected);
        }
    }

    /// Splits an SSH blob into its length-prefixed fields.
    fn blob_fields(mut blob: &[u8]) -> Vec<Vec<u8>> {
        let mut fields = Vec::new();
        while !blob.is_empty() {
            let len = u32::from_be_bytes(blob[..4].try_into().unwrap()) as usize;
            fields.push(blob[4..4 + len].to_vec());
            blob = &blob[4 + len..];
        }
        fields
    }

    #[test]
    fn rsa_blob_layout() {
        use rsa::traits::PublicKeyParts;

        for bits in [2048, 1024] {
            let pair = KeyPair::generate_rsa(bits).unwrap();
            let ssh = pair.openssh_public_key().unwrap().unwrap();
            let (key_type, encoded) = ssh.authorized_key.split_once(' ').unwrap();
            assert_eq!(key_type, "ssh-rsa");

            let blob = STANDARD.decode(encoded).unwrap();
            let fields = blob_fields(&blob);
            assert_eq!(fields.len(), 3);
            assert_eq!(fields[0], b"ssh-rsa");
            assert_eq!(fields[1], [0x01, 0x00, 0x01]);

            // The modulus has its top bit set, so the mpint gains a 0x00 prefix.
            let KeyPair::Rsa { public, .. } = &pair else {
                panic!("expected an RSA key");
            };
            let modulus = public.n().to_bytes_be();
            assert_eq!(modulus.len(), bits / 8);
            assert_eq!(fields[2].len(), bits / 8 + 1);
            assert_eq!(fields[2][0], 0x00);
            assert_eq!(&fields[2][1..], modulus.as_slice());

            assert_eq!(ssh.fingerprint_md5, md5_fingerprint(&blob));
        }
    }

    #[test]
    fn p224_has_no_openssh_key() {
        let pair = KeyPair::generate_ecdsa(EcdsaCurve::P224);
        assert_eq!(pair.openssh_public_key().unwrap(), None);
    }

    #[test]
    fn line_parses_back_with_ssh_key() {
        let pair = KeyPair::generate_ecdsa(EcdsaCurve::P384);
        let ssh = pair.openssh_public_key().unwrap().unwrap();
        let parsed = ssh_key::PublicKey::from_openssh(&ssh.authorized_key).unwrap();
        assert_eq!(parsed.algorithm().as_str(), "ecdsa-sha2-nistp384");
        assert_eq!(md5_fingerprint(&parsed.to_bytes().unwrap()), ssh.fingerprint_md5);
    }
}
