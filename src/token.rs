/// Generates `byte_length` bytes of OS entropy, encoded with the URL-safe
/// base64 alphabet without padding. Fails only if the entropy source is
/// unavailable.
pub fn generate(byte_length: usize) -> Result<String, getrandom::Error> {
    let mut buf = vec![0u8; byte_length];
    getrandom::getrandom(&mut buf)?;
    Ok(base64::encode_config(&buf, base64::URL_SAFE_NO_PAD))
}

/// Textual length of a token produced from `byte_length` entropy bytes.
pub fn encoded_len(byte_length: usize) -> usize {
    (byte_length * 4 + 2) / 3
}
