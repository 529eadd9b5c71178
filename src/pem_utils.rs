use crate::error::{KeyKitError, Result};

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
///
/// The body is wrapped at 64 columns with LF line endings and the document ends
/// with a newline.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(
        &pem,
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}

/// Convert a PEM‑encoded string to DER‑encoded bytes, checking its label.
pub fn pem_to_der(pem_str: &str, expected_label: &str) -> Result<Vec<u8>> {
    let pem = pem::parse(pem_str)?;
    if pem.tag() != expected_label {
        return Err(KeyKitError::DecodingError(format!(
            "expected PEM label \"{expected_label}\", found \"{}\"",
            pem.tag()
        )));
    }
    Ok(pem.contents().to_vec())
}
