use keykit::{Algorithm, EcdsaCurve, EncodedKeyMaterial, KeyRequest};

#[allow(dead_code)]
pub const ALL_CURVES: [EcdsaCurve; 4] = [
    EcdsaCurve::P224,
    EcdsaCurve::P256,
    EcdsaCurve::P384,
    EcdsaCurve::P521,
];

pub fn generate(request: KeyRequest) -> EncodedKeyMaterial {
    keykit::generate(&request).expect("key generation failed")
}

#[allow(dead_code)]
pub fn generate_ecdsa(curve: EcdsaCurve) -> EncodedKeyMaterial {
    generate(
        KeyRequest::builder()
            .algorithm(Algorithm::Ecdsa)
            .ecdsa_curve(curve)
            .build(),
    )
}

/// Contents of the single PEM block in `pem`, checking its label.
#[allow(dead_code)]
pub fn pem_body(pem: &str, label: &str) -> Vec<u8> {
    keykit::pem_utils::pem_to_der(pem, label).expect("malformed PEM")
}
