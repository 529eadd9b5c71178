use keykit::error::KeyKitError;
use keykit::{Algorithm, EcdsaCurve, KeyRequest};

fn main() -> Result<(), KeyKitError> {
    let requests = [
        KeyRequest::new(Algorithm::Rsa),
        KeyRequest::builder()
            .algorithm(Algorithm::Ecdsa)
            .ecdsa_curve(EcdsaCurve::P256)
            .build(),
        // P224 keys come out without an OpenSSH line or fingerprint.
        KeyRequest::new(Algorithm::Ecdsa),
        KeyRequest::new(Algorithm::Ed25519),
    ];

    for request in requests {
        let material = keykit::generate(&request)?;
        println!("== {} ({:?})", request.algorithm, request);
        for (name, value) in material.to_attributes() {
            println!("{name}:\n{value}\n");
        }
    }

    Ok(())
}
